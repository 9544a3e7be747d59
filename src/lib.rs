pub mod card_sheet;
pub mod catalog;
pub mod config;
pub mod discovery;
pub mod entries;
pub mod error;
pub mod export;
pub mod io;
pub mod models;
pub mod services;
pub mod session;
pub mod settings;
pub mod table;
pub mod ui;
pub mod utils;

// Re-export commonly used items
pub use card_sheet::{card_table, load_card, LoadedCard};
pub use catalog::{
    group_options, load_container_catalog, load_grouped, load_soft_goods_catalog, GroupedOptions,
    SoftGoodsCatalog,
};
pub use config::AppConfig;
pub use discovery::CatalogFiles;
pub use entries::{ContainerForm, EntryForm, EntryState, SelectableOption, SoftGoodsForm};
pub use error::{MissingFiles, PrefCardError, Result};
pub use export::{ExportAnswer, ExportFlow, ExportOutcome, ExportPrompt, ExportStep};
pub use io::{MemoryStore, TableStore, XlsxStore};
pub use models::{
    CatalogKind, ContainerOption, PreferenceCardRow, PreferenceCardSelection, SoftGoodOption,
};
pub use services::ServiceSelector;
pub use session::Session;
pub use settings::Settings;
pub use table::{Cell, Table};
