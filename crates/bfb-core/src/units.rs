//! SI quantities carried by the gas state.

use uom::si::f64::{
    DynamicViscosity as UomDynamicViscosity, MassDensity as UomMassDensity,
    Pressure as UomPressure, ThermodynamicTemperature as UomThermodynamicTemperature,
};

pub type DynVisc = UomDynamicViscosity;
pub type Density = UomMassDensity;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn kg_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn pa_s(v: f64) -> DynVisc {
    use uom::si::dynamic_viscosity::pascal_second;
    DynVisc::new::<pascal_second>(v)
}

/// Viscosity given in micropoise (1 µP = 1e-7 Pa·s).
#[inline]
pub fn micropoise(v: f64) -> DynVisc {
    pa_s(v * constants::PA_S_PER_MICROPOISE)
}

#[inline]
pub fn to_micropoise(mu: DynVisc) -> f64 {
    use uom::si::dynamic_viscosity::pascal_second;
    mu.get::<pascal_second>() / constants::PA_S_PER_MICROPOISE
}

pub mod constants {
    pub const G0_MPS2: f64 = 9.806_65;

    /// Universal gas constant [J/(mol K)].
    pub const R_J_PER_MOL_K: f64 = 8.314_462_618;

    /// Standard conditions for volumetric flow (0 °C, 1 atm).
    pub const STD_TEMPERATURE_K: f64 = 273.15;
    pub const STD_PRESSURE_KPA: f64 = 101.325;

    pub const PA_S_PER_MICROPOISE: f64 = 1e-7;
}
