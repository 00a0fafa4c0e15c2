use std::path::{Path, PathBuf};
use std::borrow::Cow;
use anyhow::{Context, Result};
use tracing::*;
use crate::{Error, Map};
use crate::parsers::{ParseInstance, CvrplibFmt};
use crate::raw::cvrp::Problem;


pub trait IdxNameMap {
  fn index_to_name(&self, idx: usize) -> Result<Cow<str>>;

  fn name_to_index(&self, name: &str) -> Result<usize>;

  fn len(&self) -> usize;

  fn is_empty(&self) -> bool { self.len() == 0 }

  fn check_idx(&self, idx: usize) -> Result<()> {
    if self.len() <= idx {
      Err(Error::IndexOutOfRange.into())
    } else {
      Ok(())
    }
  }

  /// Index of the instance named `key`, falling back to reading `key` as an index.
  fn lookup(&self, key: &str) -> Result<usize> {
    match self.name_to_index(key) {
      Ok(idx) => Ok(idx),
      Err(e) => match key.parse::<usize>() {
        Ok(idx) => self.check_idx(idx).map(|_| idx),
        Err(_) => Err(e),
      }
    }
  }
}


pub trait Dataset: IdxNameMap {
  type Instance;
  fn load_instance(&self, idx: usize) -> Result<Self::Instance>;
}


pub const PROBLEM_SUFFIX: &str = "vrp";
pub const SOLUTION_SUFFIX: &str = "sol";

/// A directory of instances: each problem is a `NAME.vrp` file, its solution (if any) sits next
/// to it as `NAME.sol`. Instances are indexed by name in lexicographic order.
///
/// Relative directories are resolved against the `DATA_ROOT` environment variable when it is set.
pub struct InstanceDir {
  name_order: Vec<String>,
  name_to_idx_map: Map<String, usize>,
  dir: PathBuf,
}

impl InstanceDir {
  pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
    let dir = match std::env::var_os("DATA_ROOT") {
      Some(root) => Path::new(&root).join(dir),
      None => dir.as_ref().to_path_buf(),
    };
    let ctx = format!("try read directory {:?}", &dir);
    let dir = dir.canonicalize().context(ctx)?;

    let mut p = glob::Pattern::escape(&dir.to_string_lossy());
    p.push_str("/*.");
    p.push_str(PROBLEM_SUFFIX);

    let paths: std::result::Result<Vec<PathBuf>, _> = glob::glob(&p)?.collect();
    let names: Result<Vec<String>> = paths?.iter()
      .map(|p| {
        let n = p.file_stem().ok_or_else(|| anyhow::anyhow!("missing file stem: {:?}", p))?;
        Ok(n.to_string_lossy().into_owned())
      })
      .collect();
    let mut name_order = names?;
    name_order.sort();

    let name_to_idx_map = name_order.iter().enumerate().map(|(i, s)| (s.clone(), i)).collect();
    debug!(?dir, instances = name_order.len(), "instance directory");

    Ok(InstanceDir {
      name_order,
      name_to_idx_map,
      dir,
    })
  }

  pub fn dir(&self) -> &Path { &self.dir }

  pub fn problem_path(&self, name: &str) -> PathBuf {
    self.dir.join(format!("{}.{}", name, PROBLEM_SUFFIX))
  }

  pub fn solution_path(&self, name: &str) -> PathBuf {
    self.dir.join(format!("{}.{}", name, SOLUTION_SUFFIX))
  }

  pub fn has_solution(&self, name: &str) -> bool {
    self.solution_path(name).is_file()
  }
}

impl IdxNameMap for InstanceDir {
  fn index_to_name(&self, idx: usize) -> Result<Cow<str>> {
    self.check_idx(idx)?;
    Ok(Cow::Borrowed(&self.name_order[idx]))
  }

  fn name_to_index(&self, name: &str) -> Result<usize> {
    let idx = *self.name_to_idx_map.get(name).ok_or(Error::UnknownInstanceName)?;
    Ok(idx)
  }

  fn len(&self) -> usize { self.name_order.len() }
}

impl Dataset for InstanceDir {
  type Instance = Problem;

  fn load_instance(&self, idx: usize) -> Result<Problem> {
    let name = self.index_to_name(idx)?;
    Problem::parse(CvrplibFmt(self.problem_path(&name)))
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;

  fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("instances-{}-{}", tag, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
  }

  fn kind(e: &anyhow::Error) -> Option<Error> {
    e.downcast_ref::<Error>().copied()
  }

  #[test]
  fn lists_problem_files_by_name() -> Result<()> {
    let dir = scratch_dir("list");
    for name in ["B-n78-k10", "A-n32-k5", "Golden_20"] {
      fs::write(dir.join(format!("{}.vrp", name)), "NODE_COORD_SECTION\n1 0 0\n")?;
    }
    fs::write(dir.join("A-n32-k5.sol"), "Route #1: 1\n")?;
    fs::write(dir.join("Test-Golden_20.sol"), "Route #1: 1\n")?;
    fs::write(dir.join("README"), "not an instance")?;

    let d = InstanceDir::new(&dir)?;
    assert_eq!(d.len(), 3);
    assert_eq!(d.index_to_name(0)?, "A-n32-k5");
    assert_eq!(d.index_to_name(2)?, "Golden_20");
    assert_eq!(d.name_to_index("B-n78-k10")?, 1);
    assert!(d.has_solution("A-n32-k5"));
    assert!(!d.has_solution("Golden_20"));
    assert!(d.has_solution("Test-Golden_20"));

    assert_eq!(kind(&d.name_to_index("C-n1-k1").unwrap_err()), Some(Error::UnknownInstanceName));
    assert_eq!(kind(&d.index_to_name(3).unwrap_err()), Some(Error::IndexOutOfRange));

    assert_eq!(d.load_instance(1)?.coords, vec![(0.0, 0.0)]);
    fs::remove_dir_all(&dir)?;
    Ok(())
  }

  #[test]
  fn lookup_by_name_or_index() -> Result<()> {
    let d = InstanceDir::new(Path::new("../../data/E").canonicalize()?)?;
    assert_eq!(d.lookup("E-n8-k2")?, 0);
    assert_eq!(d.lookup("0")?, 0);
    assert_eq!(kind(&d.lookup("1").unwrap_err()), Some(Error::IndexOutOfRange));
    assert_eq!(kind(&d.lookup("nope").unwrap_err()), Some(Error::UnknownInstanceName));
    assert_eq!(d.load_instance(0)?.coords.len(), 8);
    Ok(())
  }

  #[test]
  fn missing_directory() {
    let err = InstanceDir::new("/does/not/exist").err().unwrap();
    assert!(err.to_string().contains("/does/not/exist"));
  }
}
