mod confirm_files;
mod containers;
mod services;
mod sheet_picker;
mod welcome;

pub use confirm_files::ConfirmFilesScreen;
pub use containers::ContainersScreen;
pub use services::ServicesScreen;
pub use sheet_picker::SheetPickerScreen;
pub use welcome::WelcomeScreen;
