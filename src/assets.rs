pub mod decode;
pub mod noise;
