use super::common::*;
use crate::errors::CacheError;
use crate::parse::parse_mint_list;

/// Mint list checkpoint. Written once after the first authority query so later runs
/// resolve exactly the same mints.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MintCache(IndexSet<String>);

impl Deref for MintCache {
    type Target = IndexSet<String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MintCache {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl MintCache {
    pub fn new() -> Self {
        MintCache(IndexSet::new())
    }

    pub fn from_items(items: &[Item]) -> Self {
        MintCache(items.iter().map(|item| item.mint.to_string()).collect())
    }

    pub fn read(path: &Path) -> Result<Self, CacheError> {
        let display = path.display().to_string();
        let file = File::open(path).map_err(|e| CacheError::ReadFailed(display.clone(), e))?;
        let cache = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| CacheError::ParseFailed(display, e))?;
        Ok(cache)
    }

    /// Missing, unreadable and corrupt caches all count as empty.
    pub fn read_or_empty(path: &Path) -> Self {
        match Self::read(path) {
            Ok(cache) => cache,
            Err(CacheError::ReadFailed(_, ref e)) if e.kind() == ErrorKind::NotFound => {
                info!("No cache file at {}, querying chain", path.display());
                Self::new()
            }
            Err(e) => {
                error!("Error reading from file: {}", e);
                Self::new()
            }
        }
    }

    pub fn write<W: Write>(&self, writer: W) -> AnyResult<()> {
        serde_json::to_writer_pretty(writer, &self)?;
        Ok(())
    }

    pub fn write_to(&self, path: &Path) -> Result<(), CacheError> {
        let display = path.display().to_string();
        let file =
            File::create(path).map_err(|e| CacheError::WriteFailed(display.clone(), e.to_string()))?;
        self.write(file)
            .map_err(|e| CacheError::WriteFailed(display, e.to_string()))?;
        Ok(())
    }
}

/// Items to migrate: the cached mint list if there is one, otherwise every item the
/// operator is update authority of. The query result is checkpointed to `cache_path`.
pub async fn load_items<C>(client: &C, cache_path: &Path, authority: &Pubkey) -> AnyResult<Vec<Item>>
where
    C: ChainClient + ?Sized,
{
    let cache = MintCache::read_or_empty(cache_path);

    let items = if cache.is_empty() {
        info!("Querying items by update authority {}", authority);
        let items = client.items_by_update_authority(authority).await?;

        match MintCache::from_items(&items).write_to(cache_path) {
            Ok(()) => info!("Data written to file successfully."),
            Err(e) => error!("{}", e),
        }
        items
    } else {
        info!("Loaded {} mints from {}", cache.len(), cache_path.display());
        let mints: Vec<String> = cache.iter().cloned().collect();
        client.items_by_mints(&parse_mint_list(&mints)).await?
    };

    info!("{} nfts found", items.len());
    Ok(items)
}
