//! Plain data read from CVRPLIB-style problem (`.vrp`) and solution (`.sol`) files.

/// The `KEY : VALUE` lines preceding the first section of a problem file, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
  entries: Vec<(String, String)>,
}

impl Header {
  pub fn push(&mut self, key: &str, value: &str) {
    self.entries.push((key.to_string(), value.to_string()));
  }

  /// Value of the first entry named `key` (keys compare case-insensitively).
  pub fn get(&self, key: &str) -> Option<&str> {
    self.entries.iter()
      .find(|(k, _)| k.eq_ignore_ascii_case(key))
      .map(|(_, v)| v.as_str())
  }

  pub fn entries(&self) -> impl Iterator<Item=(&str, &str)> {
    self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }

  pub fn name(&self) -> Option<&str> { self.get("NAME") }

  pub fn dimension(&self) -> Option<usize> {
    self.get("DIMENSION").and_then(|v| v.parse().ok())
  }

  pub fn capacity(&self) -> Option<f64> {
    self.get("CAPACITY").and_then(|v| v.parse().ok())
  }

  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

/// A problem instance. `coords[0]` is the depot; `demand` is parallel to `coords` by position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Problem {
  pub header: Header,
  pub coords: Vec<(f64, f64)>,
  pub demand: Vec<f64>,
}

impl Problem {
  pub fn depot(&self) -> Option<(f64, f64)> {
    self.coords.first().copied()
  }
}

/// Visiting order of one vehicle. Node indices are positions in [`Problem::coords`];
/// the depot is not stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
  /// The `N` of a `Route #N:` label, if the label has that shape.
  pub number: Option<usize>,
  pub nodes: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Solution {
  pub routes: Vec<Route>,
  /// Objective value reported by a `Cost` line.
  pub cost: Option<f64>,
}
