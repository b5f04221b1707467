use std::future::Future;
use std::panic::catch_unwind;
use std::thread;

use async_executor::{Executor, Task};
use async_lock::OnceCell;
use futures_lite::future;

/// Environment variable holding the number of executor threads.
pub const THREADS_ENV: &str = "CHAT_CLIENT_THREADS";

/// Spawns a task onto the global executor (single-threaded by default).
///
/// The global executor is lazily initialized on first use and is run by background threads, so
/// spawned tasks make progress even while the calling thread is blocked on something else. The
/// number of threads can be configured with the `CHAT_CLIENT_THREADS` environment variable.
///
/// Dropping the returned [`Task`] cancels it. Call [`Task::detach()`] to let it run in the
/// background until it finishes or the process exits.
///
/// # Examples
///
/// ```
/// let task = chat_client::spawn(async {
///     1 + 2
/// });
///
/// chat_client::block_on(async {
///     assert_eq!(task.await, 3);
/// });
/// ```
pub fn spawn<T: Send + 'static>(future: impl Future<Output = T> + Send + 'static) -> Task<T> {
    global().spawn(future)
}

/// Blocks the current thread on a future, driving I/O and timers while waiting.
pub fn block_on<T>(future: impl Future<Output = T>) -> T {
    async_io::block_on(future)
}

fn global() -> &'static Executor<'static> {
    static GLOBAL: OnceCell<Executor<'_>> = OnceCell::new();
    GLOBAL.get_or_init_blocking(|| {
        let num_threads = threads_from_env(std::env::var(THREADS_ENV).ok().as_deref());

        for n in 1..=num_threads {
            thread::Builder::new()
                .name(format!("chat-client-{}", n))
                .spawn(|| loop {
                    catch_unwind(|| block_on(global().run(future::pending::<()>()))).ok();
                })
                .expect("cannot spawn executor thread");
        }

        Executor::new()
    })
}

// Parse the thread count or default to 1.
fn threads_from_env(value: Option<&str>) -> usize {
    value
        .and_then(|s| s.trim().parse().ok())
        .filter(|&n| n > 0)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_runs_in_background() {
        let task = spawn(async { thread::current().name().map(String::from) });
        let name = future::block_on(task);
        assert!(name.unwrap().starts_with("chat-client-"));
    }

    #[test]
    fn spawn_detach() {
        let (s, r) = async_channel::bounded(1);
        spawn(async move { s.send(()).await }).detach();
        assert_eq!(Ok(()), block_on(r.recv()));
    }

    #[test]
    fn same_global() {
        assert!(std::ptr::eq(global(), global()));
    }

    #[test]
    fn thread_count() {
        assert_eq!(threads_from_env(None), 1);
        assert_eq!(threads_from_env(Some("4")), 4);
        assert_eq!(threads_from_env(Some(" 2 ")), 2);
        assert_eq!(threads_from_env(Some("0")), 1);
        assert_eq!(threads_from_env(Some("many")), 1);
    }
}
