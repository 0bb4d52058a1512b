//! Configuration for envelope reconstruction and emission.
//!
//! ## Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use serde_superjson::{Config, HandlerKind, StringHandler};
//!
//! // Defaults: undefined keys are materialised, nulls are emitted as nulls
//! let config = Config::new();
//! assert!(config.create_undefined_keys());
//! assert!(!config.null_to_undefined());
//!
//! // Force the string-only big integer handler
//! let config = Config::new().with_big_int_handler(Arc::new(StringHandler));
//! assert_eq!(config.big_int_handler().unwrap().kind(), HandlerKind::String);
//! ```

use crate::bigint::{self, Availability, BigIntHandler};
use crate::Result;
use std::sync::{Arc, OnceLock};

/// Options recognised by [`parse_with_config`](crate::parse_with_config) and
/// [`stringify_with_config`](crate::stringify_with_config).
///
/// The big integer handler is selected the first time a `bigint` annotation
/// or value is met and then reused for the life of the `Config`. Every
/// builder method discards a cached choice.
///
/// # Examples
///
/// ```rust
/// use serde_superjson::Config;
///
/// let config = Config::new()
///     .with_create_undefined_keys(false)
///     .with_null_to_undefined(true)
///     .with_strict_big_int(true);
///
/// assert!(!config.create_undefined_keys());
/// assert!(config.null_to_undefined());
/// assert!(config.strict_big_int());
/// ```
#[derive(Clone, Debug)]
pub struct Config {
    create_undefined_keys: bool,
    null_to_undefined: bool,
    big_int_handler: Option<Arc<dyn BigIntHandler>>,
    strict_big_int: bool,
    availability: Availability,
    selected: OnceLock<Arc<dyn BigIntHandler>>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            create_undefined_keys: true,
            null_to_undefined: false,
            big_int_handler: None,
            strict_big_int: false,
            availability: Availability::detect(),
            selected: OnceLock::new(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an `undefined` annotation leaves an explicit `null` entry
    /// (`true`, the default) or removes the key from its parent object.
    #[must_use]
    pub fn with_create_undefined_keys(mut self, create: bool) -> Self {
        self.create_undefined_keys = create;
        self.selected = OnceLock::new();
        self
    }

    /// Whether emission annotates `null` values as `undefined`. Default `false`.
    #[must_use]
    pub fn with_null_to_undefined(mut self, enabled: bool) -> Self {
        self.null_to_undefined = enabled;
        self.selected = OnceLock::new();
        self
    }

    /// Uses `handler` for every big integer, bypassing detection.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "bigdecimal")]
    /// # {
    /// use std::sync::Arc;
    /// use serde_superjson::{parse_with_config, Config, DecimalHandler, Value};
    ///
    /// let config = Config::new().with_big_int_handler(Arc::new(DecimalHandler));
    /// let input = r#"{"json":{"n":"12"},"meta":{"values":{"n":["bigint"]},"v":1}}"#;
    /// let value = parse_with_config(input, &config).unwrap();
    /// assert_eq!(value.get("n").and_then(Value::as_bigint).unwrap().backend_name(), "bigdecimal");
    /// # }
    /// ```
    #[must_use]
    pub fn with_big_int_handler(mut self, handler: Arc<dyn BigIntHandler>) -> Self {
        self.big_int_handler = Some(handler);
        self.selected = OnceLock::new();
        self
    }

    /// Refuse the string-only fallback when no arithmetic backend is
    /// available. Default `false`.
    #[must_use]
    pub fn with_strict_big_int(mut self, strict: bool) -> Self {
        self.strict_big_int = strict;
        self.selected = OnceLock::new();
        self
    }

    /// Overrides which backends detection reports as available.
    #[must_use]
    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self.selected = OnceLock::new();
        self
    }

    #[must_use]
    pub fn create_undefined_keys(&self) -> bool {
        self.create_undefined_keys
    }

    #[must_use]
    pub fn null_to_undefined(&self) -> bool {
        self.null_to_undefined
    }

    #[must_use]
    pub fn strict_big_int(&self) -> bool {
        self.strict_big_int
    }

    #[must_use]
    pub fn availability(&self) -> Availability {
        self.availability
    }

    /// The active big integer handler, selecting it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedType`](crate::Error::UnsupportedType) in
    /// strict mode when neither arithmetic backend is available. A failed
    /// selection is not cached.
    pub fn big_int_handler(&self) -> Result<Arc<dyn BigIntHandler>> {
        if let Some(handler) = self.selected.get() {
            return Ok(Arc::clone(handler));
        }
        let handler = bigint::select(
            self.big_int_handler.clone(),
            self.strict_big_int,
            self.availability,
        )?;
        Ok(Arc::clone(self.selected.get_or_init(|| handler)))
    }
}
