use super::helper::{self, Call, RecordingChannel};
use anyhow::Result;
use metalmq_topology::{
    create_queue_definition, DefineMode, QueueDefinitionOptions, QueueType, TopologyError,
};
use serde_json::json;
use std::sync::Arc;

fn payload(args: &metalmq_topology::BrokerArguments) -> serde_json::Value {
    serde_json::to_value(args).unwrap()
}

#[tokio::test]
async fn declare_queue_without_type() -> Result<()> {
    let (topology, channel, _) = helper::topology();

    let handle = create_queue_definition(QueueDefinitionOptions::new("q1"), &topology, Arc::new(()))?
        .define()
        .await?;

    assert_eq!(handle.name(), "q1");
    assert_eq!(handle.mode(), DefineMode::Declared);
    assert_eq!(channel.check_calls(), 0);

    let asserts = channel.assert_calls();
    assert_eq!(asserts.len(), 1);
    assert_eq!(asserts[0].0, "q1");
    assert_eq!(
        payload(&asserts[0].1),
        json!({ "uniqueName": "q1", "arguments": { "x-queue-type": "classic" } })
    );

    Ok(())
}

#[tokio::test]
async fn passive_queue_is_checked_only() -> Result<()> {
    let (topology, channel, _) = helper::topology();
    let options = QueueDefinitionOptions::new("q1")
        .passive(true)
        .queue_type(QueueType::Quorum)
        .queue_limit(1000)
        .dead_letter_strategy("at-least-once");

    let definer = create_queue_definition(options, &topology, Arc::new(()))?;

    assert_eq!(definer.name(), "q1");
    assert!(definer.definition().passive);

    let handle = definer.define().await?;

    assert_eq!(handle.mode(), DefineMode::Verified);
    assert_eq!(channel.calls(), vec![Call::CheckQueue("q1".to_string())]);

    Ok(())
}

#[tokio::test]
async fn passive_false_declares_exactly_once() -> Result<()> {
    let (topology, channel, connection) = helper::topology();
    let options = QueueDefinitionOptions::new("q1").passive(false);

    create_queue_definition(options, &topology, Arc::new(()))?
        .define()
        .await?;

    assert_eq!(channel.check_calls(), 0);
    assert_eq!(channel.assert_calls().len(), 1);
    assert_eq!(*connection.channel_requests.lock().unwrap(), 1);

    Ok(())
}

#[tokio::test]
async fn declare_classic_queue_with_version() -> Result<()> {
    let (topology, channel, _) = helper::topology();
    let options = QueueDefinitionOptions::new("q1")
        .queue_type(QueueType::Classic)
        .queue_limit(1000)
        .queue_version(2)
        .max_priority(100);

    create_queue_definition(options, &topology, Arc::new(()))?
        .define()
        .await?;

    let asserts = channel.assert_calls();
    assert_eq!(
        payload(&asserts[0].1),
        json!({
            "queueLimit": 1000,
            "arguments": { "x-queue-type": "classic", "x-queue-version": 2 }
        })
    );

    Ok(())
}

#[tokio::test]
async fn declare_quorum_queue_with_dead_letter_strategy() -> Result<()> {
    let (topology, channel, _) = helper::topology();
    let options = QueueDefinitionOptions::new("q1")
        .queue_type(QueueType::Quorum)
        .queue_limit(1000)
        .auto_delete(true)
        .dead_letter_strategy("at-least-once");

    create_queue_definition(options, &topology, Arc::new(()))?
        .define()
        .await?;

    let asserts = channel.assert_calls();
    assert_eq!(
        payload(&asserts[0].1),
        json!({
            "queueLimit": 1000,
            "arguments": {
                "x-queue-type": "quorum",
                "x-dead-letter-strategy": "at-least-once"
            }
        })
    );

    Ok(())
}

#[tokio::test]
async fn empty_name_is_rejected_before_getting_channel() {
    let (topology, channel, connection) = helper::topology();

    let result = create_queue_definition(QueueDefinitionOptions::new(""), &topology, Arc::new(()));

    assert!(matches!(result, Err(TopologyError::InvalidConfiguration { .. })));
    assert_eq!(*connection.channel_requests.lock().unwrap(), 0);
    assert!(channel.calls().is_empty());
}

#[tokio::test]
async fn channel_acquisition_failure() -> Result<()> {
    let (topology, connection) = helper::disconnected_topology();

    let err = create_queue_definition(QueueDefinitionOptions::new("q1"), &topology, Arc::new(()))?
        .define()
        .await
        .unwrap_err();

    assert!(matches!(err, TopologyError::QueueDefinitionFailed { .. }));
    assert_eq!(err.queue(), Some("q1"));
    assert!(err.to_string().contains("Connection refused"));
    assert_eq!(*connection.channel_requests.lock().unwrap(), 1);

    Ok(())
}

#[tokio::test]
async fn broker_rejection_is_not_retried() -> Result<()> {
    let (topology, channel, _) = helper::topology_with(RecordingChannel::rejecting_queues());
    let options = QueueDefinitionOptions::new("q1").queue_type(QueueType::Quorum);

    let err = create_queue_definition(options, &topology, Arc::new(()))?
        .define()
        .await
        .unwrap_err();

    match &err {
        TopologyError::QueueDefinitionFailed { queue, cause } => {
            assert_eq!(queue, "q1");
            assert!(cause.to_string().contains("PRECONDITION_FAILED"));
        }
        other => panic!("{other:?} is not a definition failure"),
    }
    assert!(std::error::Error::source(&err).is_some());
    assert_eq!(channel.assert_calls().len(), 1);

    Ok(())
}

#[tokio::test]
async fn failed_check_of_passive_queue() -> Result<()> {
    let (topology, channel, _) = helper::topology_with(RecordingChannel::rejecting_queues());
    let options = QueueDefinitionOptions::new("missing").passive(true);

    let result = create_queue_definition(options, &topology, Arc::new(()))?
        .define()
        .await;

    assert!(matches!(result, Err(TopologyError::QueueDefinitionFailed { .. })));
    assert_eq!(channel.check_calls(), 1);
    assert!(channel.assert_calls().is_empty());

    Ok(())
}

#[tokio::test]
async fn ack_and_nack_go_to_the_channel() -> Result<()> {
    let (topology, channel, _) = helper::topology();

    let handle = create_queue_definition(QueueDefinitionOptions::new("q1"), &topology, Arc::new(()))?
        .define()
        .await?;

    handle.ack(&helper::delivered(1)).await?;
    handle.nack(&helper::delivered(2)).await?;

    let calls = channel.calls();
    assert_eq!(&calls[1..], &[Call::Ack(1), Call::Nack(2)]);

    Ok(())
}

#[tokio::test]
async fn rejected_ack_names_the_delivery() -> Result<()> {
    let (topology, _, _) = helper::topology_with(RecordingChannel::rejecting_acks());

    let handle = create_queue_definition(QueueDefinitionOptions::new("q1"), &topology, Arc::new(()))?
        .define()
        .await?;

    let err = handle.nack(&helper::delivered(7)).await.unwrap_err();

    assert!(matches!(
        err,
        TopologyError::AcknowledgeFailed { delivery_tag: 7, .. }
    ));
    assert_eq!(err.queue(), Some("q1"));

    Ok(())
}

#[tokio::test]
async fn handle_keeps_the_serializers() -> Result<()> {
    let (topology, _, _) = helper::topology();
    let serializers = Arc::new(vec!["application/json".to_string()]);

    let handle = create_queue_definition(QueueDefinitionOptions::new("q1"), &topology, Arc::clone(&serializers))?
        .define()
        .await?;

    assert!(Arc::ptr_eq(handle.serializers(), &serializers));

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn definers_run_concurrently() -> Result<()> {
    let (topology, channel, _) = helper::topology();
    let mut tasks = vec![];

    for i in 0..8 {
        let definer = create_queue_definition(
            QueueDefinitionOptions::new(&format!("q{i}")).queue_type(QueueType::Quorum),
            &topology,
            Arc::new(()),
        )?;

        tasks.push(tokio::spawn(definer.define()));
    }

    for task in tasks {
        task.await??;
    }

    let mut names: Vec<String> = channel.assert_calls().into_iter().map(|(name, _)| name).collect();
    names.sort();

    assert_eq!(names.len(), 8);
    assert_eq!(names[0], "q0");
    assert_eq!(names[7], "q7");

    Ok(())
}
