//! Terminal operations of a request chain.
//!
//! A terminator owns the [`RequestSettings`] built up by an endpoint call
//! site and turns them into one HTTP exchange, projected as a domain object or
//! as raw JSON/XML/HTML text.
//!
//! The domain-object projection always asks the server for `units=standard`
//! and applies the caller's unit system only when mapping into measurement
//! values, so a value is never converted twice.
//!
//! The `*_async` methods run the same synchronous path on Tokio's blocking
//! pool and must be called from within a Tokio runtime. Aborting the returned
//! [`PendingResponse`] is best-effort: once the blocking job has started, the
//! HTTP exchange runs to completion and its result is dropped.

use std::{
    future::Future,
    marker::PhantomData,
    pin::Pin,
    task::{Context, Poll},
};

use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;

use crate::{
    error::{Result, WeatherError},
    executor::RequestExecutor,
    params::{HttpMethod, ResponseFormat, UnitSystem},
    settings::RequestSettings,
};

/// A public model that is decoded from a wire model and then adapted.
pub trait FromWire: Sized {
    /// Shape of the server's JSON.
    type Wire: DeserializeOwned;

    /// Map the wire model, presenting measurements in `unit_system`.
    fn from_wire(wire: Self::Wire, unit_system: UnitSystem) -> Result<Self>;
}

pub const JSON_ONLY: &[ResponseFormat] = &[ResponseFormat::Json];
pub const JSON_XML: &[ResponseFormat] = &[ResponseFormat::Json, ResponseFormat::Xml];
pub const ALL_FORMATS: &[ResponseFormat] =
    &[ResponseFormat::Json, ResponseFormat::Xml, ResponseFormat::Html];

/// Request state shared by the single- and list-result terminators.
#[derive(Debug)]
struct Execution {
    settings: RequestSettings,
    method: HttpMethod,
    formats: &'static [ResponseFormat],
}

impl Execution {
    fn ensure_supported(&self, format: ResponseFormat) -> Result<()> {
        if self.formats.contains(&format) {
            Ok(())
        } else {
            Err(WeatherError::Unsupported(format!(
                "{} responses are not available for '{}'",
                format.as_str().to_uppercase(),
                self.settings.path()
            )))
        }
    }

    fn raw(mut self, format: ResponseFormat) -> Result<String> {
        self.ensure_supported(format)?;
        self.settings.set_response_format(format);
        RequestExecutor.execute(&self.settings, self.method)
    }

    /// Fetch JSON in standard units and decode it; returns the caller's unit system alongside.
    fn decode<W: DeserializeOwned>(mut self) -> Result<(W, UnitSystem)> {
        self.ensure_supported(ResponseFormat::Json)?;
        let requested = self.settings.unit_system();

        self.settings.set_unit_system(UnitSystem::Standard);
        self.settings.set_response_format(ResponseFormat::Json);
        let body = RequestExecutor.execute(&self.settings, self.method)?;

        let wire = serde_json::from_str(&body)?;
        Ok((wire, requested))
    }
}

/// Terminator for endpoints answering with a single record.
#[derive(Debug)]
pub struct ResponseTerminator<T> {
    execution: Execution,
    _model: PhantomData<fn() -> T>,
}

impl<T: FromWire> ResponseTerminator<T> {
    pub fn new(
        settings: RequestSettings,
        method: HttpMethod,
        formats: &'static [ResponseFormat],
    ) -> Self {
        Self {
            execution: Execution { settings, method, formats },
            _model: PhantomData,
        }
    }

    pub fn settings(&self) -> &RequestSettings {
        &self.execution.settings
    }

    pub fn as_domain_object(self) -> Result<T> {
        let (wire, unit_system) = self.execution.decode::<T::Wire>()?;
        T::from_wire(wire, unit_system)
    }

    pub fn as_json(self) -> Result<String> {
        self.execution.raw(ResponseFormat::Json)
    }

    pub fn as_xml(self) -> Result<String> {
        self.execution.raw(ResponseFormat::Xml)
    }

    pub fn as_html(self) -> Result<String> {
        self.execution.raw(ResponseFormat::Html)
    }
}

impl<T: FromWire + Send + 'static> ResponseTerminator<T> {
    pub fn as_domain_object_async(self) -> PendingResponse<T> {
        PendingResponse::spawn(move || self.as_domain_object())
    }

    pub fn as_json_async(self) -> PendingResponse<String> {
        PendingResponse::spawn(move || self.as_json())
    }

    pub fn as_xml_async(self) -> PendingResponse<String> {
        PendingResponse::spawn(move || self.as_xml())
    }

    pub fn as_html_async(self) -> PendingResponse<String> {
        PendingResponse::spawn(move || self.as_html())
    }
}

/// Terminator for endpoints answering with a JSON array of records.
///
/// Records keep the server's order; no sorting is implied.
#[derive(Debug)]
pub struct ListResponseTerminator<T> {
    execution: Execution,
    _model: PhantomData<fn() -> T>,
}

impl<T: FromWire> ListResponseTerminator<T> {
    pub fn new(
        settings: RequestSettings,
        method: HttpMethod,
        formats: &'static [ResponseFormat],
    ) -> Self {
        Self {
            execution: Execution { settings, method, formats },
            _model: PhantomData,
        }
    }

    pub fn settings(&self) -> &RequestSettings {
        &self.execution.settings
    }

    pub fn as_domain_object(self) -> Result<Vec<T>> {
        let (wires, unit_system) = self.execution.decode::<Vec<T::Wire>>()?;
        wires.into_iter().map(|wire| T::from_wire(wire, unit_system)).collect()
    }

    pub fn as_json(self) -> Result<String> {
        self.execution.raw(ResponseFormat::Json)
    }

    pub fn as_xml(self) -> Result<String> {
        self.execution.raw(ResponseFormat::Xml)
    }

    pub fn as_html(self) -> Result<String> {
        self.execution.raw(ResponseFormat::Html)
    }
}

impl<T: FromWire + Send + 'static> ListResponseTerminator<T> {
    pub fn as_domain_object_async(self) -> PendingResponse<Vec<T>> {
        PendingResponse::spawn(move || self.as_domain_object())
    }

    pub fn as_json_async(self) -> PendingResponse<String> {
        PendingResponse::spawn(move || self.as_json())
    }

    pub fn as_xml_async(self) -> PendingResponse<String> {
        PendingResponse::spawn(move || self.as_xml())
    }

    pub fn as_html_async(self) -> PendingResponse<String> {
        PendingResponse::spawn(move || self.as_html())
    }
}

/// Handle to a request running on the blocking pool.
#[derive(Debug)]
#[must_use = "the request result is only observable by awaiting the handle"]
pub struct PendingResponse<T> {
    handle: JoinHandle<Result<T>>,
}

impl<T: Send + 'static> PendingResponse<T> {
    fn spawn<F>(work: F) -> Self
    where
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        Self { handle: tokio::task::spawn_blocking(work) }
    }
}

impl<T> PendingResponse<T> {
    /// Best-effort cancellation. Only a request that has not started yet is
    /// prevented; an exchange already in flight completes and is discarded.
    pub fn abort(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl<T> Future for PendingResponse<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle).poll(cx).map(|joined| match joined {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => {
                Err(WeatherError::Task("request was cancelled".to_string()))
            }
            Err(e) => Err(WeatherError::Task(e.to_string())),
        })
    }
}
