pub mod blur;
pub mod composite;
pub mod saturation;
pub mod scale;
