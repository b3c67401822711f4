/// Represents the backend where array data lives.
///
/// Arrays on different devices cannot be combined directly; gradients are
/// always allocated on the device of the value they belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Default)]
pub enum StorageDevice {
    /// Data is stored in main system memory (RAM).
    /// This is the default device.
    #[default]
    CPU,
    /// Data is resident on an accelerator, identified by its ordinal.
    GPU(u32),
}

