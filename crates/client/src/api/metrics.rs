//! Real-time metrics adapter.

use unisphere_domain::{
    Collection, CreateMetricRealTimeQueryBody, Instance, Metric, MetricQueryResult,
    MetricRealTimeQuery, Result,
};

use super::{map_not_found, UnisphereClient, DEFAULT_PAGE_SIZE};
use crate::uri;

const METRIC_TYPE: &str = "metric";
const QUERY_TYPE: &str = "metricRealTimeQuery";
const RESULT_TYPE: &str = "metricQueryResult";
const METRIC_FIELDS: &str = "id,path,description,isRealtimeAvailable,unitDisplayString";
const RESULT_FIELDS: &str = "queryId,path,timestamp,values";

#[derive(Debug)]
pub struct MetricsApi<'a> {
    client: &'a UnisphereClient,
}

impl<'a> MetricsApi<'a> {
    pub(super) fn new(client: &'a UnisphereClient) -> Self {
        Self { client }
    }

    /// Start a real-time query sampling `paths` every `interval` seconds.
    pub async fn create_real_time_query(
        &self,
        paths: Vec<String>,
        interval: u32,
    ) -> Result<MetricRealTimeQuery> {
        let body = CreateMetricRealTimeQueryBody { paths, interval };
        let created: Instance<MetricRealTimeQuery> = self
            .client
            .session()
            .post(&uri::list_instances(QUERY_TYPE), &body)
            .await?;
        Ok(created.content)
    }

    pub async fn delete_query(&self, query_id: i64) -> Result<()> {
        let id = query_id.to_string();
        self.client
            .session()
            .delete(&uri::instance_by_id(QUERY_TYPE, &id))
            .await
            .map_err(|e| map_not_found(e, "metric query", &id))
    }

    /// Fetch the samples collected so far for a query.
    pub async fn query_results(&self, query_id: i64) -> Result<Vec<MetricQueryResult>> {
        let filter = format!("queryId eq {query_id}");
        let path = format!(
            "{}&fields={}",
            uri::list_instances_filtered(RESULT_TYPE, &filter),
            RESULT_FIELDS
        );
        let collection: Collection<MetricQueryResult> = self.client.session().get(&path).await?;
        Ok(collection.into_contents())
    }

    /// Enumerate every metric path available in real time, paging through
    /// the metric catalog until a short page ends it.
    pub async fn real_time_paths(&self) -> Result<Vec<String>> {
        let filter = "isRealtimeAvailable eq true";
        let base = format!(
            "{}&fields={}",
            uri::list_instances_filtered(METRIC_TYPE, filter),
            METRIC_FIELDS
        );

        let mut paths = Vec::new();
        let mut page = 1;
        loop {
            let collection: Collection<Metric> = self
                .client
                .session()
                .get(&uri::paged(&base, page, DEFAULT_PAGE_SIZE))
                .await?;
            let metrics = collection.into_contents();
            let count = metrics.len();
            paths.extend(metrics.into_iter().map(|m| m.path));
            if count < DEFAULT_PAGE_SIZE as usize {
                return Ok(paths);
            }
            page += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::super::test_support::authenticated_client;
    use super::*;

    fn metric_entries(count: usize, offset: usize) -> serde_json::Value {
        let entries: Vec<serde_json::Value> = (0..count)
            .map(|i| {
                serde_json::json!({"content": {
                    "id": ((offset + i) as i64),
                    "path": format!("sp.*.metric{}", offset + i),
                    "isRealtimeAvailable": true
                }})
            })
            .collect();
        serde_json::json!({"entries": entries})
    }

    #[tokio::test]
    async fn create_query_posts_paths_and_interval() {
        let server = MockServer::start().await;
        let client = authenticated_client(&server).await;

        Mock::given(method("POST"))
            .and(path("/api/types/metricRealTimeQuery/instances"))
            .and(body_partial_json(serde_json::json!({
                "paths": ["sp.*.cpu.summary.utilization"],
                "interval": 5
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": {"id": 7, "paths": ["sp.*.cpu.summary.utilization"], "interval": 5}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let query = client
            .metrics()
            .create_real_time_query(vec!["sp.*.cpu.summary.utilization".into()], 5)
            .await
            .expect("query");
        assert_eq!(query.id, 7);
    }

    #[tokio::test]
    async fn results_are_filtered_by_query_id() {
        let server = MockServer::start().await;
        let client = authenticated_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/types/metricQueryResult/instances"))
            .and(query_param("filter", "queryId eq 7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "entries": [{"content": {
                    "queryId": 7,
                    "path": "sp.*.cpu.summary.utilization",
                    "timestamp": "2024-05-01T00:00:00.000Z",
                    "values": {"spa": 12.5}
                }}]
            })))
            .mount(&server)
            .await;

        let results = client.metrics().query_results(7).await.expect("results");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].values["spa"], 12.5);
    }

    #[tokio::test]
    async fn path_enumeration_pages_until_a_short_page() {
        let server = MockServer::start().await;
        let client = authenticated_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/types/metric/instances"))
            .and(query_param("page", "1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(metric_entries(DEFAULT_PAGE_SIZE as usize, 0)),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/types/metric/instances"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(metric_entries(3, 100)))
            .expect(1)
            .mount(&server)
            .await;

        let paths = client.metrics().real_time_paths().await.expect("paths");
        assert_eq!(paths.len(), DEFAULT_PAGE_SIZE as usize + 3);
        assert_eq!(paths[0], "sp.*.metric0");
        assert_eq!(paths.last().map(String::as_str), Some("sp.*.metric102"));
    }

    #[tokio::test]
    async fn delete_query_targets_the_instance() {
        let server = MockServer::start().await;
        let client = authenticated_client(&server).await;

        Mock::given(method("DELETE"))
            .and(path("/api/instances/metricRealTimeQuery/7"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client.metrics().delete_query(7).await.expect("delete");
    }
}
