//! The single logical thread that owns application state, and the helpers
//! that post work back to it.
//!
//! Worker and timer threads never touch the state directly.  They submit
//! jobs through a [`Sink`], and the thread running [`Dispatcher::run`]
//! applies them one at a time.

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
    time::Duration,
};

use crossbeam_channel::{
    bounded, select, tick, unbounded, Receiver, Sender, TryRecvError,
};
use parking_lot::Mutex;
use threadpool::ThreadPool;

use crate::error::Error;

pub type Job<T> = Box<dyn FnOnce(&mut T) + Send + 'static>;

enum Dispatch<T> {
    Run(Job<T>),
    Quit,
}

pub struct Dispatcher<T> {
    sender: Sender<Dispatch<T>>,
    receiver: Receiver<Dispatch<T>>,
}

impl<T> Dispatcher<T> {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    pub fn sink(&self) -> Sink<T> {
        Sink {
            sender: self.sender.clone(),
        }
    }

    /// Apply jobs until a sink asks us to quit.
    pub fn run(&self, data: &mut T) {
        for dispatch in self.receiver.iter() {
            match dispatch {
                Dispatch::Run(job) => job(data),
                Dispatch::Quit => break,
            }
        }
    }

    /// Apply every job queued right now, without blocking.  Returns the
    /// number of jobs applied.
    pub fn run_pending(&self, data: &mut T) -> usize {
        let mut count = 0;
        loop {
            match self.receiver.try_recv() {
                Ok(Dispatch::Run(job)) => {
                    job(data);
                    count += 1;
                }
                Ok(Dispatch::Quit) | Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => {
                    break count;
                }
            }
        }
    }
}

pub struct Sink<T> {
    sender: Sender<Dispatch<T>>,
}

impl<T> Clone for Sink<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T> Sink<T> {
    pub fn submit(&self, job: impl FnOnce(&mut T) + Send + 'static) -> Result<(), Error> {
        self.sender
            .send(Dispatch::Run(Box::new(job)))
            .map_err(|_| Error::Disconnected)
    }

    pub fn quit(&self) -> Result<(), Error> {
        self.sender
            .send(Dispatch::Quit)
            .map_err(|_| Error::Disconnected)
    }
}

/// Runs blocking calls off the dispatcher thread.
pub trait Executor: Send + Sync {
    fn execute(&self, job: Box<dyn FnOnce() + Send + 'static>);
}

pub struct Pool {
    pool: Mutex<ThreadPool>,
}

impl Pool {
    pub fn new(name: &str, threads: usize) -> Self {
        Self {
            pool: Mutex::new(ThreadPool::with_name(name.into(), threads)),
        }
    }
}

impl Executor for Pool {
    fn execute(&self, job: Box<dyn FnOnce() + Send + 'static>) {
        self.pool.lock().execute(job);
    }
}

/// Runs the call on the calling thread.  Completions still go through the
/// dispatcher queue, so ordering stays the same as with a real pool.
pub struct Immediate;

impl Executor for Immediate {
    fn execute(&self, job: Box<dyn FnOnce() + Send + 'static>) {
        job();
    }
}

/// A repeating timer that submits `job` every `interval`.  The timer thread
/// exits as soon as the `Timer` is dropped.
pub struct Timer {
    stop: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl Timer {
    pub fn repeating<T: 'static>(
        interval: Duration,
        sink: Sink<T>,
        job: impl Fn(&mut T) + Send + Sync + 'static,
    ) -> Result<Self, Error> {
        let (stop_send, stop_recv) = bounded::<()>(0);
        let job = Arc::new(job);
        let thread = thread::Builder::new()
            .name("refresh_timer".into())
            .spawn(move || {
                let ticker = tick(interval);
                loop {
                    select! {
                        recv(stop_recv) -> _ => break,
                        recv(ticker) -> _ => {
                            let job = Arc::clone(&job);
                            if sink.submit(move |data: &mut T| job(data)).is_err() {
                                break;
                            }
                        }
                    }
                }
            })?;
        Ok(Self {
            stop: Some(stop_send),
            thread: Some(thread),
        })
    }

    /// Stop the timer and wait for its thread to exit.
    pub fn cancel(mut self) {
        self.stop.take();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        // Disconnecting the stop channel wakes the timer thread up.
        self.stop.take();
    }
}
