use std::backtrace::Backtrace;
use std::sync::{RwLockReadGuard, RwLockWriteGuard};
use anyhow::anyhow;
use log::error;
use crate::error::ApiError;
use crate::store::Store;
use crate::SharedStore;

pub(crate) fn status_any_error(err: anyhow::Error) -> ApiError {
    error!("Error: {err}\nbacktrace: {}", Backtrace::capture());
    ApiError::Internal(format!("Error: {}", err))
}

pub(crate) fn read_store(store: &SharedStore) -> Result<RwLockReadGuard<'_, Store>, ApiError> {
    store.read().map_err(|e| status_any_error(anyhow!("Store lock poisoned: {e}")))
}
pub(crate) fn write_store(store: &SharedStore) -> Result<RwLockWriteGuard<'_, Store>, ApiError> {
    store.write().map_err(|e| status_any_error(anyhow!("Store lock poisoned: {e}")))
}

#[cfg(test)]
mod test {
    use std::sync::RwLock;
    use super::*;

    #[test]
    fn test_poisoned_store_is_internal_error() {
        let store: SharedStore = RwLock::new(Store::default());
        let _ = std::panic::catch_unwind(|| {
            let _guard = store.write().unwrap();
            panic!("poison the lock");
        });
        let err = write_store(&store).err().unwrap();
        assert!(matches!(err, ApiError::Internal(_)));
        assert!(read_store(&store).is_err());
    }
}
