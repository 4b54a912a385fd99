//! Blocking bridge for synchronous hosts (the FFI layer).

use tokio::runtime::{Builder, Handle, RuntimeFlavor};

use crate::domain::error::{EngineError, EngineResult};

/// Drive `fut` to completion from synchronous code.
///
/// Outside any runtime a throwaway current-thread runtime is used. Inside a
/// multi-thread runtime the worker is handed over with `block_in_place`.
/// Inside a current-thread runtime there is no safe way to block, so the
/// call fails with [`EngineError::Config`] instead of panicking.
pub fn run_on_current_thread<F, T>(fut: F) -> EngineResult<T>
where
  F: std::future::Future<Output = EngineResult<T>>,
{
  match Handle::try_current() {
    Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
      tokio::task::block_in_place(|| handle.block_on(fut))
    }
    Ok(_) => Err(EngineError::Config(
      "blocking engine call made from inside a current-thread runtime".into(),
    )),
    Err(_) => {
      let rt = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| EngineError::Config(format!("failed to start runtime: {e}")))?;
      rt.block_on(fut)
    }
  }
}
