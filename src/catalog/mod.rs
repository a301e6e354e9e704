mod index;
mod load;
mod song;

pub use index::{normalize, CatalogIndex};
pub use load::{load_catalog, load_filtered_catalog, load_track_ids};
pub use song::{Catalog, FilteredCatalog, FilteredEntry, SongEntry};
