pub mod kucoin;

pub use kucoin::KuCoinClient;
