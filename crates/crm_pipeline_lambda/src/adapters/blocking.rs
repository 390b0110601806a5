use std::future::Future;

/// Drives an async SDK call to completion from synchronous handler code.
///
/// Requires a multi-threaded Tokio runtime; the Lambda binaries and the async
/// tests both run on one.
pub fn block_on_current<F>(future: F) -> F::Output
where
    F: Future,
{
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
