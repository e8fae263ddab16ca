pub mod clock;
pub mod image_builder;
pub mod qr_encoder;
pub mod qr_service;
pub mod storage;
pub mod wifi;
