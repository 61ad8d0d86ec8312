//! File descriptor limit detection for capping walker parallelism (Unix).

/// Estimated descriptors held per walker thread: one open directory handle plus metadata lookups.
const FDS_PER_WORKER: usize = 4;

/// Fraction of the process FD limit to use (leave headroom for stdout, logging, etc.).
const FD_LIMIT_FRACTION: f64 = 0.8;

/// Returns the soft limit for max open file descriptors, or `None` if unavailable (e.g. Windows).
#[cfg(unix)]
pub fn max_open_fds() -> Option<u64> {
    use std::mem::MaybeUninit;
    let mut rlim = MaybeUninit::<libc::rlimit>::uninit();
    if unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, rlim.as_mut_ptr()) } != 0 {
        return None;
    }
    let rlim = unsafe { rlim.assume_init() };
    let cur = rlim.rlim_cur;
    // RLIM_INFINITY is typically !0 or u64::MAX; treat as "no practical limit"
    if cur == libc::RLIM_INFINITY || cur > i64::MAX as u64 {
        return None;
    }
    Some(cur)
}

#[cfg(not(unix))]
pub fn max_open_fds() -> Option<u64> {
    None
}

/// Max walker threads that stay under ~80% of the FD limit. `None` if no limit is known.
pub fn max_workers_by_fd_limit() -> Option<usize> {
    let limit = max_open_fds()?;
    let usable = (limit as f64 * FD_LIMIT_FRACTION) as usize;
    if usable < FDS_PER_WORKER {
        return Some(1);
    }
    Some(usable / FDS_PER_WORKER)
}

/// Pick the walker pool size: explicit request wins, else `available` capped by the FD limit, never below `floor`.
pub fn walker_threads(requested: Option<usize>, available: usize, floor: usize) -> usize {
    if let Some(n) = requested {
        return n.max(floor);
    }
    let capped = match max_workers_by_fd_limit() {
        Some(fd_cap) if fd_cap < available => {
            log::debug!("Capping walker threads {} -> {} (FD limit ~80%)", available, fd_cap);
            fd_cap
        }
        _ => available,
    };
    capped.max(floor)
}
