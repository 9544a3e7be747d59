mod dialogs;
mod entry_list;
mod file_picker;
mod preview_table;

pub use dialogs::{show_dialog, DialogResponse};
pub use entry_list::EntryList;
pub use file_picker::FilePicker;
pub use preview_table::show_preview_table;
