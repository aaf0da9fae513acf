pub mod douban;
pub mod image_proxy;

pub use douban::DoubanClient;
pub use image_proxy::ImageProxy;
