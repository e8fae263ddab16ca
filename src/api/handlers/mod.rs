pub mod download;
pub mod health;
pub mod index;
pub mod qr;
