use std::sync::Arc;

use crate::{
    data::{ApiError, Waiting},
    error::Error,
    runtime::{Executor, Sink},
    webapi::WebApi,
};

/// Picks one component's waiting flag out of the application state.
pub type WaitingLens<T> = fn(&mut T) -> &mut Waiting;

type CallReq<A> = Box<dyn FnOnce(&WebApi) -> Result<A, Error> + Send + 'static>;
type CallOk<T, A> = Box<dyn FnOnce(&mut T, A) + Send + 'static>;
type CallErr<T> = Box<dyn FnOnce(&mut T, u16, ApiError) + Send + 'static>;
type CallFinally<T> = Box<dyn FnOnce(&mut T) + Send + 'static>;

/// One outbound API call and what to do once it settles.
pub struct Call<T, A> {
    request: CallReq<A>,
    handlers: Handlers<T, A>,
}

struct Handlers<T, A> {
    waiting: WaitingLens<T>,
    on_success: CallOk<T, A>,
    on_error: CallErr<T>,
    on_finally: Option<CallFinally<T>>,
}

impl<T: 'static, A: 'static> Call<T, A> {
    pub fn new(
        waiting: WaitingLens<T>,
        request: impl FnOnce(&WebApi) -> Result<A, Error> + Send + 'static,
    ) -> Self {
        Self {
            request: Box::new(request),
            handlers: Handlers {
                waiting,
                on_success: Box::new(|_: &mut T, _: A| {}),
                on_error: Box::new(|_: &mut T, _: u16, _: ApiError| {}),
                on_finally: None,
            },
        }
    }

    pub fn on_success(mut self, f: impl FnOnce(&mut T, A) + Send + 'static) -> Self {
        self.handlers.on_success = Box::new(f);
        self
    }

    pub fn on_error(mut self, f: impl FnOnce(&mut T, u16, ApiError) + Send + 'static) -> Self {
        self.handlers.on_error = Box::new(f);
        self
    }

    pub fn on_finally(mut self, f: impl FnOnce(&mut T) + Send + 'static) -> Self {
        self.handlers.on_finally = Some(Box::new(f));
        self
    }
}

impl<T, A> Handlers<T, A> {
    fn settle(self, data: &mut T, result: Result<A, Error>) {
        // Settled before any handler runs.
        (self.waiting)(data).settle();
        match result {
            Ok(artifact) => (self.on_success)(data, artifact),
            Err(err) => {
                let (status, error) = err.into_failure();
                log::warn!("API call failed ({}): {}", status, error.message);
                (self.on_error)(data, status, error);
            }
        }
        if let Some(on_finally) = self.on_finally {
            on_finally(data);
        }
    }
}

/// Runs API calls off the dispatcher thread and settles them back on it.
/// Calls are independent: nothing is retried and nothing is deduplicated.
pub struct Orchestrator<T> {
    api: Arc<WebApi>,
    executor: Arc<dyn Executor>,
    sink: Sink<T>,
}

impl<T> Clone for Orchestrator<T> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            executor: Arc::clone(&self.executor),
            sink: self.sink.clone(),
        }
    }
}

impl<T: 'static> Orchestrator<T> {
    pub fn new(api: Arc<WebApi>, executor: Arc<dyn Executor>, sink: Sink<T>) -> Self {
        Self {
            api,
            executor,
            sink,
        }
    }

    pub fn sink(&self) -> &Sink<T> {
        &self.sink
    }

    /// Marks `waiting` and issues the call.  `waiting` must be the same flag
    /// the call's lens points at.
    pub fn call<A: Send + 'static>(&self, waiting: &mut Waiting, call: Call<T, A>) {
        waiting.begin();
        let api = Arc::clone(&self.api);
        let sink = self.sink.clone();
        self.executor.execute(Box::new(move || {
            let Call { request, handlers } = call;
            let result = request(&api);
            if sink
                .submit(move |data: &mut T| handlers.settle(data, result))
                .is_err()
            {
                log::debug!("dropping API response, dispatcher is gone");
            }
        }));
    }
}
