pub mod disambiguate;
pub mod discogs;
pub mod error;
pub mod filename;
pub mod rename;
pub mod resolver;
pub mod router;
pub mod services;
pub mod tags;
pub mod traits;

pub use discogs::{DiscogsClient, DiscogsClientBuilder};
pub use router::{DestinationRouter, LibraryRoots};
pub use services::{SortReport, Sorter, SorterBuilder};
pub use tags::FileTagReader;
pub use traits::{CatalogClient, TagReader};
