//! Outbound lookup against the MyHealthfinder topic-search API.
//!
//! One GET with two query parameters; the JSON response is reshaped
//! into a flat topic list for display. Upstream failures of any kind
//! degrade to a message rendered in place of data — the page itself
//! never errors.
//!
use serde::Deserialize;
use tracing::warn;

/// A hardcoded reference statistic shown beside the live topic list.
pub(crate) struct ReferenceStat {
    pub(crate) country: &'static str,
    pub(crate) fact: &'static str,
    pub(crate) value: &'static str,
    pub(crate) source: &'static str,
    pub(crate) year: &'static str,
}

/// CDC heart disease figures, kept inline as a reliable baseline.
pub(crate) const CDC_STATS: &[ReferenceStat] = &[
    ReferenceStat {
        country: "United States",
        fact: "Heart Disease Deaths",
        value: "659,041 annually",
        source: "CDC",
        year: "2023",
    },
    ReferenceStat {
        country: "United States",
        fact: "Cost Burden",
        value: "$363 billion annually",
        source: "CDC",
        year: "2023",
    },
    ReferenceStat {
        country: "United States",
        fact: "Prevalence",
        value: "1 in 4 deaths",
        source: "CDC",
        year: "2023",
    },
];

/// One health topic reshaped from the API response.
pub(crate) struct HealthTopic {
    pub(crate) title: String,
    pub(crate) category: String,
    pub(crate) last_update: String,
    pub(crate) url: String,
}

/// What `/global-stats` renders: live topics, or a message when the
/// upstream call failed.
pub(crate) enum StatsOutcome {
    Topics(Vec<HealthTopic>),
    Unavailable(String),
}

#[derive(Deserialize, Default)]
struct TopicSearchResponse {
    #[serde(rename = "Result", default)]
    result: TopicSearchResult,
}

#[derive(Deserialize, Default)]
struct TopicSearchResult {
    #[serde(rename = "Resources", default)]
    resources: Resources,
}

#[derive(Deserialize, Default)]
struct Resources {
    #[serde(rename = "Resource", default)]
    resource: Vec<Resource>,
}

#[derive(Deserialize)]
struct Resource {
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Categories", default)]
    categories: String,
    #[serde(rename = "LastUpdate", default)]
    last_update: String,
    #[serde(rename = "AccessibleVersion", default)]
    accessible_version: String,
}

/// Fetch and reshape the topic list for the given keyword endpoint.
pub(crate) async fn fetch_global_stats(url: &str) -> StatsOutcome {
    let response = match reqwest::Client::new()
        .get(url)
        .query(&[("lang", "en"), ("keyword", "heart disease")])
        .send()
        .await
    {
        Ok(response) => response,
        Err(err) => {
            warn!(error = %err, "statistics request failed");
            return StatsOutcome::Unavailable(format!("An error occurred: {err}"));
        }
    };

    let status = response.status();
    if !status.is_success() {
        warn!(status = status.as_u16(), "statistics API returned non-success");
        return StatsOutcome::Unavailable(format!(
            "Error accessing Health.gov API: {}",
            status.as_u16()
        ));
    }

    match response.text().await {
        Ok(body) => match parse_topics(&body) {
            Ok(topics) => StatsOutcome::Topics(topics),
            Err(err) => {
                warn!(error = %err, "statistics response did not parse");
                StatsOutcome::Unavailable(format!("An error occurred: {err}"))
            }
        },
        Err(err) => {
            warn!(error = %err, "statistics response body unreadable");
            StatsOutcome::Unavailable(format!("An error occurred: {err}"))
        }
    }
}

/// Reshape the raw response body into display entries. Missing
/// sections mean an empty list, matching the API's habit of omitting
/// `Result` wrappers rather than sending empty arrays.
fn parse_topics(body: &str) -> Result<Vec<HealthTopic>, serde_json::Error> {
    let response: TopicSearchResponse = serde_json::from_str(body)?;
    Ok(response
        .result
        .resources
        .resource
        .into_iter()
        .map(|resource| HealthTopic {
            title: resource.title,
            category: resource.categories,
            last_update: resource.last_update,
            url: resource.accessible_version,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpListener;

    const SAMPLE_RESPONSE: &str = r#"{
        "Result": {
            "Total": 2,
            "Resources": {
                "Resource": [
                    {
                        "Title": "Keep Your Heart Healthy",
                        "Categories": "Heart Health",
                        "LastUpdate": "1690000000",
                        "AccessibleVersion": "https://health.gov/topics/heart"
                    },
                    {
                        "Title": "Eat Less Sodium",
                        "Categories": "Nutrition",
                        "LastUpdate": "1680000000",
                        "AccessibleVersion": "https://health.gov/topics/sodium"
                    }
                ]
            }
        }
    }"#;

    #[test]
    fn topics_reshape_from_response_json() {
        let topics = parse_topics(SAMPLE_RESPONSE).unwrap();
        assert_eq!(topics.len(), 2);
        assert_eq!(topics[0].title, "Keep Your Heart Healthy");
        assert_eq!(topics[0].category, "Heart Health");
        assert_eq!(topics[1].url, "https://health.gov/topics/sodium");
    }

    #[test]
    fn missing_result_section_means_no_topics() {
        assert!(parse_topics("{}").unwrap().is_empty());
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(parse_topics("not json").is_err());
    }

    /// Non-200 upstream answers degrade to a rendered message.
    #[tokio::test]
    async fn non_success_status_degrades_to_message() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            socket
                .write_all(
                    b"HTTP/1.1 500 Internal Server Error\r\n\
                      content-length: 0\r\nconnection: close\r\n\r\n",
                )
                .await
                .unwrap();
        });

        let outcome = fetch_global_stats(&format!("http://{addr}/")).await;
        match outcome {
            StatsOutcome::Unavailable(message) => assert!(message.contains("500")),
            StatsOutcome::Topics(_) => panic!("expected degraded outcome"),
        }
    }

    /// A dead upstream degrades the same way instead of failing the page.
    #[tokio::test]
    async fn connection_failure_degrades_to_message() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        match fetch_global_stats(&format!("http://{addr}/")).await {
            StatsOutcome::Unavailable(message) => {
                assert!(message.starts_with("An error occurred"))
            }
            StatsOutcome::Topics(_) => panic!("expected degraded outcome"),
        }
    }
}
