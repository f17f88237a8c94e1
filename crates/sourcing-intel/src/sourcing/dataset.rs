use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::domain::{Cooperative, CooperativeId, Region};

/// Cooperatives and regions loaded from a JSON document shaped
/// `{ "cooperatives": [...], "regions": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourcingDataset {
    #[serde(default)]
    pub cooperatives: Vec<Cooperative>,
    #[serde(default)]
    pub regions: Vec<Region>,
}

impl SourcingDataset {
    pub fn from_reader<T: Read>(reader: T) -> Result<Self, DatasetError> {
        let dataset: SourcingDataset =
            serde_json::from_reader(reader).map_err(|source| DatasetError::Parse { source })?;
        dataset.validate()?;
        Ok(dataset)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    fn validate(&self) -> Result<(), DatasetError> {
        let mut seen = BTreeSet::new();
        for cooperative in &self.cooperatives {
            if !seen.insert(cooperative.id) {
                return Err(DatasetError::DuplicateCooperative(cooperative.id));
            }
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("unable to read dataset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset could not be decoded: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },
    #[error("cooperative {0} appears more than once in the dataset")]
    DuplicateCooperative(CooperativeId),
}
