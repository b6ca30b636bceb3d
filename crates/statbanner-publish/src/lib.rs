//! Publish collaborator: uploads the banner, or writes it to disk.

pub mod file;
pub mod oauth;
pub mod twitter;

pub use file::FilePublisher;
pub use twitter::TwitterPublisher;

use async_trait::async_trait;
use statbanner_core::Result;

/// Where and how big the banner is placed on the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerPlacement {
    pub width: u32,
    pub height: u32,
    pub offset_left: u32,
    pub offset_top: u32,
}

impl Default for BannerPlacement {
    fn default() -> Self {
        Self {
            width: 1500,
            height: 500,
            offset_left: 0,
            offset_top: 0,
        }
    }
}

/// Destination for a rendered banner.
#[async_trait]
pub trait BannerPublisher: Send + Sync {
    async fn publish(&self, image: &[u8], placement: &BannerPlacement) -> Result<()>;

    /// Short name for logs.
    fn name(&self) -> &str;
}
