//! Codec benchmarks: request framing, command encoding and reply decoding.

use bytes::{Bytes, BytesMut};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use streamwire_protocol::commands::CreateTopic;
use streamwire_protocol::models::{
    CompressionAlgorithm, MaxTopicSize, MessageExpiry, Partition, Topic, TopicDetails,
};
use streamwire_protocol::wire::{decode_list, encode_list};
use streamwire_protocol::{
    Command, CommandCode, Identifier, RequestFrame, ResponseFrame, WireEncode,
};

fn create_test_topic(id: u32) -> Topic {
    Topic {
        id,
        created_at: 1_700_000_000_000_000,
        name: format!("topic-{}", id),
        size_bytes: 64 * 1024,
        message_expiry: MessageExpiry::NeverExpire,
        compression_algorithm: CompressionAlgorithm::None,
        max_topic_size: MaxTopicSize::Unlimited,
        replication_factor: 1,
        messages_count: 1000,
        partitions_count: 3,
    }
}

fn create_test_details(partitions: u32) -> TopicDetails {
    TopicDetails {
        topic: create_test_topic(1),
        partitions: (1..=partitions)
            .map(|id| Partition {
                id,
                created_at: 1_700_000_000_000_000,
                segments_count: 4,
                current_offset: 999,
                size_bytes: 16 * 1024,
                messages_count: 1000,
            })
            .collect(),
    }
}

fn bench_request_frame_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("request_frame_encode");

    for size in [16, 1000, 10000] {
        let frame = RequestFrame::new(CommandCode::CreateTopic, Bytes::from(vec![7u8; size]));

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &frame, |b, frame| {
            b.iter(|| black_box(frame.encode().unwrap()));
        });
    }

    group.finish();
}

fn bench_response_frame_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("response_frame_decode");

    for size in [16, 1000, 10000] {
        let encoded = ResponseFrame::ok(Bytes::from(vec![7u8; size])).encode();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &encoded, |b, encoded| {
            b.iter(|| {
                let mut buf = encoded.clone();
                black_box(ResponseFrame::decode(&mut buf).unwrap())
            });
        });
    }

    group.finish();
}

fn bench_create_topic_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_topic_encode");
    group.throughput(Throughput::Elements(1));

    let command = CreateTopic::new(Identifier::named("orders").unwrap(), "payments")
        .with_partitions(8)
        .with_compression(CompressionAlgorithm::Gzip)
        .with_replication_factor(3);
    group.bench_function("validate_and_encode", |b| {
        b.iter(|| black_box(command.to_bytes().unwrap()));
    });

    group.finish();
}

fn bench_topic_list_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("topic_list_decode");

    for count in [1, 100, 1000] {
        let topics: Vec<Topic> = (1..=count).map(create_test_topic).collect();
        let payload = encode_list(&topics).unwrap();

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &payload, |b, payload| {
            b.iter(|| black_box(decode_list::<Topic>(payload.clone()).unwrap()));
        });
    }

    group.finish();
}

fn bench_topic_details_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("topic_details_decode");

    for partitions in [1, 100, 1000] {
        let mut buf = BytesMut::new();
        create_test_details(partitions).encode_to(&mut buf).unwrap();
        let payload = buf.freeze();

        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(partitions),
            &payload,
            |b, payload| {
                b.iter(|| {
                    black_box(
                        <TopicDetails as streamwire_protocol::Reply>::decode(payload.clone())
                            .unwrap(),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_request_frame_encode,
    bench_response_frame_decode,
    bench_create_topic_encode,
    bench_topic_list_decode,
    bench_topic_details_decode,
);

criterion_main!(benches);
