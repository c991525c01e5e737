use std::os::fd::AsFd;
use std::time::Duration;

use rustix::event::{PollFd, PollFlags, Timespec, poll};

/// Block until `fd` is readable or `timeout` elapses.
///
/// `None` blocks indefinitely. Returns whether the descriptor became
/// readable. `EINTR` is passed through as `Errno::INTR` for the caller to
/// retry.
pub fn wait_readable(fd: impl AsFd, timeout: Option<Duration>) -> rustix::io::Result<bool> {
    let timeout = timeout.map(|d| Timespec {
        tv_sec: d.as_secs() as _,
        tv_nsec: d.subsec_nanos() as _,
    });
    let mut fds = [PollFd::new(&fd, PollFlags::IN)];
    let ready = poll(&mut fds, timeout.as_ref())?;
    Ok(ready > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::os::unix::net::UnixStream;
    use std::time::Instant;

    #[test]
    fn test_times_out_when_nothing_to_read() {
        let (a, _b) = UnixStream::pair().unwrap();
        let start = Instant::now();
        assert!(!wait_readable(&a, Some(Duration::from_millis(20))).unwrap());
        assert!(start.elapsed() >= Duration::from_millis(15));
    }

    #[test]
    fn test_zero_timeout_returns_immediately() {
        let (a, _b) = UnixStream::pair().unwrap();
        assert!(!wait_readable(&a, Some(Duration::ZERO)).unwrap());
    }

    #[test]
    fn test_readable_after_write() {
        let (a, mut b) = UnixStream::pair().unwrap();
        b.write_all(&[1]).unwrap();
        assert!(wait_readable(&a, None).unwrap());
    }
}
