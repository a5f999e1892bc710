//! HttpVectorIndex — implements `vesper_core::VectorIndex` over a
//! Qdrant-shaped HTTP collection API.

use serde_json::Value;
use vesper_core::errors::VectorError;
use vesper_core::traits::is_valid_collection_name;
use vesper_core::{VectorHit, VectorIndex, VectorStats, VesperResult};

use crate::transport::{Transport, TransportConfig};
use crate::wire;

pub struct HttpVectorIndex {
    transport: Transport,
}

impl HttpVectorIndex {
    pub fn new(config: TransportConfig) -> Self {
        Self { transport: Transport::new(config) }
    }

    fn check_collection_name(name: &str) -> VesperResult<()> {
        if !is_valid_collection_name(name) {
            return Err(VectorError::InvalidCollectionName { name: name.to_string() }.into());
        }
        Ok(())
    }
}

impl VectorIndex for HttpVectorIndex {
    fn init_collection(&self, name: &str, dim: usize) -> VesperResult<()> {
        Self::check_collection_name(name)?;
        let body = wire::CreateCollectionRequest {
            vectors: wire::VectorParams { size: dim, distance: "Cosine" },
        };
        let _: Value = self.transport.send_json(
            reqwest::Method::PUT,
            &format!("/collections/{name}"),
            Some(&body),
        )?;
        Ok(())
    }

    fn upsert(
        &self,
        collection: &str,
        id: uuid::Uuid,
        vector: &[f32],
        payload: Value,
    ) -> VesperResult<()> {
        Self::check_collection_name(collection)?;
        let body = wire::UpsertRequest {
            points: vec![wire::Point { id, vector: vector.to_vec(), payload }],
            wait: true,
        };
        let _: Value = self.transport.send_json(
            reqwest::Method::PUT,
            &format!("/collections/{collection}/points?wait=true"),
            Some(&body),
        )?;
        Ok(())
    }

    fn search(&self, collection: &str, vector: &[f32], top_k: usize) -> VesperResult<Vec<VectorHit>> {
        Self::check_collection_name(collection)?;
        let body = wire::SearchRequest { vector: vector.to_vec(), limit: top_k, with_payload: true };
        let resp: wire::SearchResponse = self.transport.send_json(
            reqwest::Method::POST,
            &format!("/collections/{collection}/points/search"),
            Some(&body),
        )?;
        Ok(resp
            .result
            .into_iter()
            .map(|hit| VectorHit {
                id: hit.id,
                score: hit.score,
                payload: hit.payload.unwrap_or(Value::Null),
            })
            .collect())
    }

    fn delete(&self, collection: &str, id: uuid::Uuid) -> VesperResult<()> {
        Self::check_collection_name(collection)?;
        let body = wire::DeletePointsRequest { points: vec![id], wait: true };
        let _: Value = self.transport.send_json(
            reqwest::Method::POST,
            &format!("/collections/{collection}/points/delete?wait=true"),
            Some(&body),
        )?;
        Ok(())
    }

    fn stats(&self, collection: &str) -> VesperResult<VectorStats> {
        Self::check_collection_name(collection)?;
        let resp: wire::CollectionInfoResponse = self.transport.send_json::<(), _>(
            reqwest::Method::GET,
            &format!("/collections/{collection}"),
            None,
        )?;
        Ok(VectorStats {
            points: resp.result.points_count,
            indexed: resp.result.indexed_vectors_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_collection_name() {
        let index = HttpVectorIndex::new(TransportConfig::default());
        let err = index.init_collection("bad name!", 1024).unwrap_err();
        assert_eq!(err.kind(), vesper_core::ErrorKind::InvalidInput);
    }
}
