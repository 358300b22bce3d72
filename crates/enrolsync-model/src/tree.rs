//! Campus tree: campus -> stream -> timetable identifiers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Campus, Stream, TimetableId};

/// Index of timetable identifiers grouped by campus and stream.
///
/// Every (campus, stream) combination in the fixed universe is present
/// from construction; combinations with no matches stay as empty lists
/// rather than absent keys. Within a bucket, identifiers keep the order
/// they were pushed in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampusTree {
    buckets: BTreeMap<Campus, BTreeMap<Stream, Vec<TimetableId>>>,
}

impl CampusTree {
    pub fn new() -> Self {
        let mut buckets = BTreeMap::new();
        for campus in Campus::ALL {
            let mut streams = BTreeMap::new();
            for stream in Stream::ALL {
                streams.insert(stream, Vec::new());
            }
            buckets.insert(campus, streams);
        }
        Self { buckets }
    }

    pub fn push(&mut self, campus: Campus, stream: Stream, id: TimetableId) {
        if let Some(bucket) = self
            .buckets
            .get_mut(&campus)
            .and_then(|streams| streams.get_mut(&stream))
        {
            bucket.push(id);
        }
    }

    pub fn bucket(&self, campus: Campus, stream: Stream) -> &[TimetableId] {
        self.buckets
            .get(&campus)
            .and_then(|streams| streams.get(&stream))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total identifiers across all buckets.
    pub fn len(&self) -> usize {
        self.buckets
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate all (campus, stream, identifier) entries.
    pub fn iter(&self) -> impl Iterator<Item = (Campus, Stream, &TimetableId)> {
        self.buckets.iter().flat_map(|(campus, streams)| {
            streams.iter().flat_map(move |(stream, ids)| {
                ids.iter().map(move |id| (*campus, *stream, id))
            })
        })
    }

    pub fn contains(&self, id: &TimetableId) -> bool {
        self.iter().any(|(_, _, entry)| entry == id)
    }
}

impl Default for CampusTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_buckets_exist_when_empty() {
        let tree = CampusTree::new();
        for campus in Campus::ALL {
            for stream in Stream::ALL {
                assert!(tree.bucket(campus, stream).is_empty());
            }
        }
        assert!(tree.is_empty());
    }

    #[test]
    fn push_preserves_bucket_order() {
        let mut tree = CampusTree::new();
        let first = TimetableId::new("WA Stream1 Group A").unwrap();
        let second = TimetableId::new("WA Stream1 Group B").unwrap();
        tree.push(Campus::Wa, Stream::Stream1, first.clone());
        tree.push(Campus::Wa, Stream::Stream1, second.clone());
        assert_eq!(tree.bucket(Campus::Wa, Stream::Stream1), &[first, second]);
        assert_eq!(tree.len(), 2);
    }
}
