//! Blocking readiness loop over the notification descriptor

use std::ops::ControlFlow;
use std::os::fd::{AsFd, AsRawFd, RawFd};

use nix::errno::Errno;
use nix::sys::epoll::{Epoll, EpollCreateFlags, EpollEvent, EpollFlags, EpollTimeout};
use tracing::trace;

use crate::error::{AutorunError, AutorunResult};

/// Readiness slots per wait
const MAX_EVENTS: usize = 2;

/// One descriptor reported ready by a wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ready {
    pub fd: RawFd,
}

/// Single-threaded epoll loop
pub struct Multiplexer {
    epoll: Epoll,
}

impl Multiplexer {
    pub fn new() -> AutorunResult<Self> {
        let epoll =
            Epoll::new(EpollCreateFlags::EPOLL_CLOEXEC).map_err(AutorunError::MultiplexerInit)?;
        Ok(Self { epoll })
    }

    /// Add a descriptor of interest; readiness is reported with its raw fd.
    pub fn register<Fd: AsFd>(&self, fd: Fd) -> AutorunResult<()> {
        let raw = fd.as_fd().as_raw_fd();
        let event = EpollEvent::new(EpollFlags::EPOLLIN, raw as u64);
        self.epoll.add(fd, event).map_err(AutorunError::Register)
    }

    /// Block for readiness and hand each non-empty wait result to `handler`.
    ///
    /// `EINTR` is retried without calling the handler. Any other wait error
    /// ends the loop. Otherwise the loop only ends when the handler breaks,
    /// and the break value is returned.
    pub fn run<F>(&self, mut handler: F) -> AutorunResult<()>
    where
        F: FnMut(&[Ready]) -> ControlFlow<AutorunResult<()>>,
    {
        let mut events = [EpollEvent::empty(); MAX_EVENTS];

        loop {
            let count = match self.epoll.wait(&mut events, EpollTimeout::NONE) {
                Ok(count) => count,
                Err(Errno::EINTR) => continue,
                Err(errno) => return Err(AutorunError::Wait(errno)),
            };
            trace!(count, "epoll_wait");
            if count == 0 {
                continue;
            }

            let ready: Vec<Ready> = events[..count]
                .iter()
                .map(|event| Ready {
                    fd: event.data() as RawFd,
                })
                .collect();

            if let ControlFlow::Break(result) = handler(&ready) {
                return result;
            }
        }
    }
}
