/// Required columns of a container catalog
pub const CONTAINER_COLUMNS: [&str; 3] = ["Service", "Container Name", "Reference ID"];
/// Required columns of a soft-goods catalog
pub const SOFT_GOODS_COLUMNS: [&str; 2] = ["ITEM DESCRIPTION", "VENDOR PART#"];

pub const CATALOG_SERVICE: &str = "Service";
pub const CATALOG_CONTAINER_NAME: &str = "Container Name";
pub const CATALOG_ITEM_DESCRIPTION: &str = "ITEM DESCRIPTION";
pub const CATALOG_VENDOR_PART: &str = "VENDOR PART#";

pub const COL_QUANTITY: &str = "Quantity";
pub const COL_SERVICE: &str = "Service";
pub const COL_CONTAINER_NAME: &str = "Container Name";
pub const COL_ITEM_DESCRIPTION: &str = "Item Description";
pub const COL_VENDOR_PART: &str = "Vendor Part #";
pub const COL_HOLD: &str = "Hold";

/// Column layout of every saved preference card sheet
pub const SHEET_COLUMNS: [&str; 6] = [
    COL_QUANTITY,
    COL_SERVICE,
    COL_CONTAINER_NAME,
    COL_ITEM_DESCRIPTION,
    COL_VENDOR_PART,
    COL_HOLD,
];

/// The two reference files the program works from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Container,
    SoftGoods,
}

impl CatalogKind {
    /// Human name used in dialogs ("container file", "soft goods file")
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogKind::Container => "container file",
            CatalogKind::SoftGoods => "soft goods file",
        }
    }

    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            CatalogKind::Container => &CONTAINER_COLUMNS,
            CatalogKind::SoftGoods => &SOFT_GOODS_COLUMNS,
        }
    }
}

/// A selectable instrument container, identified by service + name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerOption {
    pub service: String,
    pub container_name: String,
}

impl ContainerOption {
    pub fn new(service: impl Into<String>, container_name: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            container_name: container_name.into(),
        }
    }
}

/// A selectable soft good, identified by description + vendor part number
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SoftGoodOption {
    pub item_description: String,
    pub vendor_part_number: String,
}

impl SoftGoodOption {
    pub fn new(item_description: impl Into<String>, vendor_part_number: impl Into<String>) -> Self {
        Self {
            item_description: item_description.into(),
            vendor_part_number: vendor_part_number.into(),
        }
    }
}

/// One line of a preference card.
///
/// Both variants share the sheet layout in [`SHEET_COLUMNS`]; the fields a
/// variant does not carry are written as empty cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceCardRow {
    Instrument {
        quantity: u32,
        container: ContainerOption,
        hold: bool,
    },
    SoftGood {
        quantity: u32,
        item: SoftGoodOption,
        hold: bool,
    },
}

impl PreferenceCardRow {
    pub fn instrument(quantity: u32, service: &str, container_name: &str, hold: bool) -> Self {
        PreferenceCardRow::Instrument {
            quantity,
            container: ContainerOption::new(service, container_name),
            hold,
        }
    }

    pub fn soft_good(quantity: u32, item_description: &str, vendor_part: &str, hold: bool) -> Self {
        PreferenceCardRow::SoftGood {
            quantity,
            item: SoftGoodOption::new(item_description, vendor_part),
            hold,
        }
    }

    pub fn quantity(&self) -> u32 {
        match self {
            PreferenceCardRow::Instrument { quantity, .. }
            | PreferenceCardRow::SoftGood { quantity, .. } => *quantity,
        }
    }

    pub fn hold(&self) -> bool {
        match self {
            PreferenceCardRow::Instrument { hold, .. } | PreferenceCardRow::SoftGood { hold, .. } => {
                *hold
            }
        }
    }

    pub fn container(&self) -> Option<&ContainerOption> {
        match self {
            PreferenceCardRow::Instrument { container, .. } => Some(container),
            PreferenceCardRow::SoftGood { .. } => None,
        }
    }

    pub fn soft_good_item(&self) -> Option<&SoftGoodOption> {
        match self {
            PreferenceCardRow::SoftGood { item, .. } => Some(item),
            PreferenceCardRow::Instrument { .. } => None,
        }
    }
}

/// Everything chosen for one in-progress card
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceCardSelection {
    pub instruments: Vec<PreferenceCardRow>,
    pub soft_goods: Vec<PreferenceCardRow>,
}

impl PreferenceCardSelection {
    pub fn new(instruments: Vec<PreferenceCardRow>, soft_goods: Vec<PreferenceCardRow>) -> Self {
        Self {
            instruments,
            soft_goods,
        }
    }

    /// Instrument rows followed by soft-goods rows, in export order
    pub fn combined(&self) -> Vec<PreferenceCardRow> {
        self.instruments
            .iter()
            .chain(self.soft_goods.iter())
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty() && self.soft_goods.is_empty()
    }

    /// Distinct services of the instrument rows, first appearance first
    pub fn services(&self) -> Vec<String> {
        let mut services: Vec<String> = Vec::new();
        for container in self.instruments.iter().filter_map(PreferenceCardRow::container) {
            if !services.contains(&container.service) {
                services.push(container.service.clone());
            }
        }
        services
    }
}
