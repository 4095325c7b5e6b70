//! Correlation identifier resolution
//!
//! Incoming lines may carry a malformed or missing context id and, depending
//! on the pattern variant, a missing recipient. The resolver repairs both
//! against the message-history store before a group is delivered:
//!
//! - A context id that matches the strict UUID shape is accepted as-is.
//! - Otherwise the referenced prior message supplies the context, and its
//!   sender supplies the recipient when one is required but missing.
//! - When the reference cannot be found either, a fresh context id is
//!   generated; the resolver never returns an empty context id.
//!
//! A recipient of the form `unknown_<N>` is not a literal service id but an
//! index into the configured discovery profile list.

use std::sync::Arc;

use regex::Regex;
use tracing::info;
use uuid::Uuid;

use crate::app::models::{Destination, DiscoveryProfile};
use crate::app::ports::MessageHistory;
use crate::constants::DISCOVERY_RECIPIENT_PREFIX;
use crate::{Error, Result};

/// Strict UUID shape accepted for incoming context ids
const UUID_PATTERN: &str =
    "^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$";

/// Outcome of correlation resolution for one message group
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCorrelation {
    /// Context id to send the group under, never empty
    pub context_id: String,

    /// Recipient service id, `Some` whenever a recipient is required
    pub recipient_id: Option<String>,
}

/// Resolver of context and recipient identifiers against message history
pub struct CorrelationResolver {
    history: Arc<dyn MessageHistory>,
    profiles: Vec<DiscoveryProfile>,
    recipient_required: bool,
    uuid_pattern: Regex,
}

impl CorrelationResolver {
    /// Create a resolver over the given history store and profile list
    ///
    /// `recipient_required` is true under the pattern variant that carries a
    /// recipient column.
    pub fn new(
        history: Arc<dyn MessageHistory>,
        profiles: Vec<DiscoveryProfile>,
        recipient_required: bool,
    ) -> Self {
        Self {
            history,
            profiles,
            recipient_required,
            uuid_pattern: Regex::new(UUID_PATTERN).expect("static UUID pattern compiles"),
        }
    }

    /// Resolve the context and recipient identifiers of one message group
    ///
    /// Returns resolved copies; the inputs are never mutated. The returned
    /// context id is guaranteed non-empty. Fails with a correlation error
    /// when a recipient is required but cannot be resolved from the input or
    /// from message history.
    pub async fn resolve(
        &self,
        reference_message_id: &str,
        context_id: &str,
        recipient_id: Option<&str>,
    ) -> Result<ResolvedCorrelation> {
        let mut context = context_id.to_string();
        let mut recipient = recipient_id
            .map(str::to_string)
            .filter(|r| !r.is_empty());

        let recipient_missing = self.recipient_required && recipient.is_none();

        if !self.uuid_pattern.is_match(&context) || recipient_missing {
            info!(
                "Provided context id '{}' was invalid or recipient missing, trying reference message '{}'",
                context, reference_message_id
            );

            match self
                .history
                .lookup_message_by_id(reference_message_id)
                .await?
            {
                Some(record) => {
                    context = record.context_id;
                    info!(
                        "Reference message '{}' found, using its context id '{}'",
                        reference_message_id, context
                    );
                    if recipient_missing && !record.sender_service_id.is_empty() {
                        info!(
                            "Discovered recipient '{}' from reference message sender",
                            record.sender_service_id
                        );
                        recipient = Some(record.sender_service_id);
                    }
                }
                None => {
                    context = Uuid::new_v4().to_string();
                    info!(
                        "Reference message '{}' not found, generated context id '{}'",
                        reference_message_id, context
                    );
                }
            }
        }

        // Last resort: the context id must never leave here empty
        if context.is_empty() {
            context = Uuid::new_v4().to_string();
            info!("Context id recovery failed, generated new id '{}'", context);
        }

        if self.recipient_required && recipient.is_none() {
            return Err(Error::correlation(
                "Recipient service id could not be resolved from the input or from message history",
            ));
        }

        Ok(ResolvedCorrelation {
            context_id: context,
            recipient_id: recipient,
        })
    }

    /// Resolve a recipient id into a delivery destination
    ///
    /// `unknown_<N>` selects the discovery profile at index `N`; anything
    /// else is taken as a concrete recipient service id.
    pub fn destination(&self, recipient_id: &str) -> Result<Destination> {
        let Some(rest) = recipient_id.strip_prefix(DISCOVERY_RECIPIENT_PREFIX) else {
            return Ok(Destination::Known(recipient_id.to_string()));
        };

        let index: usize = rest
            .strip_prefix('_')
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| {
                Error::correlation(format!(
                    "Malformed discovery recipient '{}': expected the form {}_<N>",
                    recipient_id, DISCOVERY_RECIPIENT_PREFIX
                ))
            })?;

        let profile = self.profiles.get(index).ok_or_else(|| {
            Error::correlation(format!(
                "Profile specified: {} cannot be found in the {} configured profiles",
                index,
                self.profiles.len()
            ))
        })?;

        Ok(Destination::Discover(profile.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::MessageRecord;
    use async_trait::async_trait;
    use std::collections::HashMap;

    const VALID_CONTEXT: &str = "f648cfd1-aade-41b9-a29e-17a37de2c09b";

    /// History store backed by a fixed map
    struct FixedHistory {
        messages: HashMap<String, MessageRecord>,
    }

    impl FixedHistory {
        fn empty() -> Arc<Self> {
            Arc::new(Self {
                messages: HashMap::new(),
            })
        }

        fn with_message(id: &str, context_id: &str, sender: &str) -> Arc<Self> {
            let mut messages = HashMap::new();
            messages.insert(
                id.to_string(),
                MessageRecord {
                    context_id: context_id.to_string(),
                    sender_service_id: sender.to_string(),
                },
            );
            Arc::new(Self { messages })
        }
    }

    #[async_trait]
    impl MessageHistory for FixedHistory {
        async fn lookup_message_by_id(&self, id: &str) -> Result<Option<MessageRecord>> {
            Ok(self.messages.get(id).cloned())
        }
    }

    fn is_uuid(value: &str) -> bool {
        Regex::new(UUID_PATTERN).unwrap().is_match(value)
    }

    #[tokio::test]
    async fn test_valid_context_and_recipient_accepted_as_is() {
        let resolver = CorrelationResolver::new(FixedHistory::empty(), vec![], true);

        let resolved = resolver
            .resolve("ref-1", VALID_CONTEXT, Some("svcX"))
            .await
            .unwrap();

        assert_eq!(resolved.context_id, VALID_CONTEXT);
        assert_eq!(resolved.recipient_id.as_deref(), Some("svcX"));
    }

    #[tokio::test]
    async fn test_invalid_context_taken_from_reference_message() {
        let history = FixedHistory::with_message("ref-1", VALID_CONTEXT, "svcSender");
        let resolver = CorrelationResolver::new(history, vec![], true);

        let resolved = resolver
            .resolve("ref-1", "not-a-uuid", Some("svcX"))
            .await
            .unwrap();

        assert_eq!(resolved.context_id, VALID_CONTEXT);
        // The provided recipient is kept when present
        assert_eq!(resolved.recipient_id.as_deref(), Some("svcX"));
    }

    #[tokio::test]
    async fn test_missing_recipient_taken_from_reference_sender() {
        let history = FixedHistory::with_message("ref-1", VALID_CONTEXT, "svcSender");
        let resolver = CorrelationResolver::new(history, vec![], true);

        let resolved = resolver.resolve("ref-1", "", None).await.unwrap();

        assert_eq!(resolved.context_id, VALID_CONTEXT);
        assert_eq!(resolved.recipient_id.as_deref(), Some("svcSender"));
    }

    #[tokio::test]
    async fn test_unresolvable_reference_generates_fresh_uuid() {
        let resolver = CorrelationResolver::new(FixedHistory::empty(), vec![], true);

        let resolved = resolver
            .resolve("ref-unknown", "not-a-uuid", Some("svcX"))
            .await
            .unwrap();

        assert_ne!(resolved.context_id, "not-a-uuid");
        assert!(is_uuid(&resolved.context_id));
    }

    #[tokio::test]
    async fn test_generated_context_ids_differ_between_calls() {
        let resolver = CorrelationResolver::new(FixedHistory::empty(), vec![], true);

        let first = resolver
            .resolve("ref-unknown", "", Some("svcX"))
            .await
            .unwrap();
        let second = resolver
            .resolve("ref-unknown", "", Some("svcX"))
            .await
            .unwrap();

        assert_ne!(first.context_id, second.context_id);
    }

    #[tokio::test]
    async fn test_empty_context_from_history_is_replaced() {
        // A reference message whose own context id is empty must not leak out
        let history = FixedHistory::with_message("ref-1", "", "svcSender");
        let resolver = CorrelationResolver::new(history, vec![], true);

        let resolved = resolver.resolve("ref-1", "", Some("svcX")).await.unwrap();

        assert!(!resolved.context_id.is_empty());
        assert!(is_uuid(&resolved.context_id));
    }

    #[tokio::test]
    async fn test_required_recipient_unresolved_is_an_error() {
        let resolver = CorrelationResolver::new(FixedHistory::empty(), vec![], true);

        let error = resolver.resolve("ref-unknown", "", None).await.unwrap_err();
        assert!(error.to_string().contains("Recipient service id"));
    }

    #[tokio::test]
    async fn test_recipient_not_required_resolves_without_one() {
        let resolver = CorrelationResolver::new(FixedHistory::empty(), vec![], false);

        let resolved = resolver.resolve("ref-1", VALID_CONTEXT, None).await.unwrap();
        assert_eq!(resolved.context_id, VALID_CONTEXT);
        assert_eq!(resolved.recipient_id, None);
    }

    #[test]
    fn test_destination_known_recipient() {
        let resolver = CorrelationResolver::new(FixedHistory::empty(), vec![], true);

        let destination = resolver.destination("svcX").unwrap();
        assert_eq!(destination, Destination::Known("svcX".to_string()));
    }

    #[test]
    fn test_destination_discovery_profile_by_index() {
        let profiles = vec![
            DiscoveryProfile {
                community: Some("Customs".to_string()),
                ..Default::default()
            },
            DiscoveryProfile {
                community: Some("FisheriesControl".to_string()),
                ..Default::default()
            },
        ];
        let resolver = CorrelationResolver::new(FixedHistory::empty(), profiles, true);

        match resolver.destination("unknown_1").unwrap() {
            Destination::Discover(profile) => {
                assert_eq!(profile.community.as_deref(), Some("FisheriesControl"));
            }
            other => panic!("expected discovery destination, got {:?}", other),
        }
    }

    #[test]
    fn test_destination_profile_index_out_of_range() {
        let profiles = vec![DiscoveryProfile {
            community: Some("Customs".to_string()),
            ..Default::default()
        }];
        let resolver = CorrelationResolver::new(FixedHistory::empty(), profiles, true);

        let error = resolver.destination("unknown_1").unwrap_err();
        let message = error.to_string();
        assert!(message.contains("1"));
        assert!(message.contains("configured profiles"));
    }

    #[test]
    fn test_destination_malformed_discovery_recipient() {
        let resolver = CorrelationResolver::new(FixedHistory::empty(), vec![], true);

        assert!(resolver.destination("unknown").is_err());
        assert!(resolver.destination("unknown_x").is_err());
    }
}
