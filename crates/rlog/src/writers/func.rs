//! FnWriter - adapts a bundle of plain closures into a [`LogWriter`]

use contracts::{ContractError, InitArg, LogWriter};

type InitFn = Box<dyn Fn(&InitArg) -> Result<(), ContractError> + Send + Sync>;
type DestroyFn = Box<dyn Fn() + Send + Sync>;
type WriteFn = Box<dyn Fn(&[u8]) -> Result<(), ContractError> + Send + Sync>;

/// Writer built from optional closures
///
/// A missing `init` or `write` closure counts as success; a missing
/// `destroy` is a no-op.
///
/// ```ignore
/// let lines = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&lines);
/// let writer = FnWriter::new().on_write(move |data| {
///     sink.lock().push(data.to_vec());
///     Ok(())
/// });
/// logger.add_fn_endpoint("memory", writer)?;
/// ```
#[derive(Default)]
pub struct FnWriter {
    init: Option<InitFn>,
    destroy: Option<DestroyFn>,
    write: Option<WriteFn>,
}

impl FnWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_init<F>(mut self, f: F) -> Self
    where
        F: Fn(&InitArg) -> Result<(), ContractError> + Send + Sync + 'static,
    {
        self.init = Some(Box::new(f));
        self
    }

    pub fn on_destroy<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.destroy = Some(Box::new(f));
        self
    }

    pub fn on_write<F>(mut self, f: F) -> Self
    where
        F: Fn(&[u8]) -> Result<(), ContractError> + Send + Sync + 'static,
    {
        self.write = Some(Box::new(f));
        self
    }
}

impl LogWriter for FnWriter {
    fn init(&self, arg: &InitArg) -> Result<(), ContractError> {
        match &self.init {
            Some(f) => f(arg),
            None => Ok(()),
        }
    }

    fn destroy(&self) {
        if let Some(f) = &self.destroy {
            f();
        }
    }

    fn write(&self, data: &[u8]) -> Result<(), ContractError> {
        match &self.write {
            Some(f) => f(data),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for FnWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnWriter")
            .field("init", &self.init.is_some())
            .field("destroy", &self.destroy.is_some())
            .field("write", &self.write.is_some())
            .finish()
    }
}
