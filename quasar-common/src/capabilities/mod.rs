pub mod sensor;

pub mod ids {
    pub const SENSOR: &str = "quasar.sensor";
}
