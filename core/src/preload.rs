use alloc::vec::Vec;
use core::future::Future;
use futures_util::future::try_join_all;

use crate::*;

/// Capability to fetch the picture for a symbol.
pub trait ImageProvider {
    type Resource;

    fn fetch_image(&self, symbol: Symbol) -> impl Future<Output = Result<Self::Resource>>;
}

/// Symbols a fresh session needs loaded before its board may be shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreloadRequest {
    pub session: SessionId,
    pub symbols: Vec<Symbol>,
}

/// Fetches every symbol concurrently, failing as a whole on the first failed fetch.
pub async fn preload_images<P: ImageProvider>(
    provider: &P,
    symbols: impl IntoIterator<Item = Symbol>,
) -> Result<Vec<(Symbol, P::Resource)>> {
    let fetches = symbols.into_iter().map(|symbol| async move {
        let resource = provider.fetch_image(symbol).await.inspect_err(|err| {
            log::warn!("preload failed: {}", err);
        })?;
        Ok::<_, GameError>((symbol, resource))
    });

    let loaded = try_join_all(fetches).await?;
    log::debug!("preloaded {} images", loaded.len());
    Ok(loaded)
}
