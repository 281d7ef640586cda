use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Identifier of the user that owns tracks and dashboards.
///
/// Users themselves live outside this workspace (session / auth layer);
/// the core only ever receives the id explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
  /// Generates a new random identifier.
  pub fn new() -> Self {
    UserId(Uuid::new_v4())
  }

  pub fn from_uuid(u: Uuid) -> Self {
    UserId(u)
  }
}

impl FromStr for UserId {
  type Err = uuid::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Uuid::parse_str(s.trim()).map(UserId)
  }
}

impl fmt::Display for UserId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// Opaque identifier of a persisted dashboard definition.
///
/// It is the value addressed by `/dashboard-view/{id}`, so parsing must
/// never panic: a malformed id is simply a dashboard that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DashboardId(Uuid);

impl DashboardId {
  /// Generates a new random identifier.
  pub fn new() -> Self {
    DashboardId(Uuid::new_v4())
  }

  pub fn from_uuid(u: Uuid) -> Self {
    DashboardId(u)
  }
}

impl FromStr for DashboardId {
  type Err = uuid::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Uuid::parse_str(s.trim()).map(DashboardId)
  }
}

impl fmt::Display for DashboardId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}
