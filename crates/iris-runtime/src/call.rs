//! Method calls arriving on the channel.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::CapabilityError;

/// Methods registered on the vision channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    InitializeVision,
    AnalyzeImage,
}

impl Method {
    pub const ALL: [Method; 2] = [Method::InitializeVision, Method::AnalyzeImage];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::InitializeVision => "initializeVision",
            Method::AnalyzeImage => "analyzeImage",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = CapabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| CapabilityError::not_implemented(s))
    }
}

/// One invocation from the front end.
///
/// `method` is kept as the raw name so an unregistered method can still be
/// carried to the endpoint and answered with `NOT_IMPLEMENTED`. `arguments`
/// is whatever the caller sent; only an object is valid for methods that
/// take arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    pub method: String,
    #[serde(default)]
    pub arguments: Value,
}

impl Call {
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }

    /// Call with no arguments.
    pub fn bare(method: impl Into<String>) -> Self {
        Self::new(method, Value::Null)
    }

    /// Resolve the method name against the registered set.
    pub fn method(&self) -> Result<Method, CapabilityError> {
        self.method.parse()
    }
}

/// Validated arguments of `analyzeImage`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeImageArgs {
    pub image_path: String,
}

impl AnalyzeImageArgs {
    pub const IMAGE_PATH: &'static str = "imagePath";

    pub fn from_arguments(arguments: &Value) -> Result<Self, CapabilityError> {
        let map = arguments
            .as_object()
            .ok_or_else(|| CapabilityError::invalid_arguments("Invalid arguments"))?;

        let image_path = match map.get(Self::IMAGE_PATH) {
            Some(Value::String(path)) => path,
            Some(_) => {
                return Err(CapabilityError::invalid_arguments(format!(
                    "'{}' must be a string",
                    Self::IMAGE_PATH
                )))
            }
            None => {
                return Err(CapabilityError::invalid_arguments(format!(
                    "Missing required argument '{}'",
                    Self::IMAGE_PATH
                )))
            }
        };

        if image_path.is_empty() {
            return Err(CapabilityError::invalid_arguments(format!(
                "'{}' must not be empty",
                Self::IMAGE_PATH
            )));
        }

        Ok(Self {
            image_path: image_path.clone(),
        })
    }
}
