use slurm_dashboard::domain::node::NodeStatus;
use slurm_dashboard::domain::partition_summary::PartitionOrder;
use slurm_dashboard::{gpu_summary, parse_nodes, parse_partitions, parse_queue, partition_summary};

const NODES: &str = include_str!("data/scontrol_nodes.txt");
const PARTITIONS: &str = include_str!("data/sinfo.txt");
const QUEUE: &str = include_str!("data/squeue.txt");

#[test]
fn test_node_inventory() {
    let nodes = parse_nodes(NODES);

    let names: Vec<&str> = nodes.iter().filter_map(|node| node.name.as_deref()).collect();
    assert_eq!(names, vec!["c001", "c002", "c003", "g001", "g002", "g003", "g004"]);

    let statuses: Vec<NodeStatus> = nodes.iter().map(|node| node.status).collect();
    assert_eq!(
        statuses,
        vec![NodeStatus::Idle, NodeStatus::Mixed, NodeStatus::Down, NodeStatus::Mixed, NodeStatus::Idle, NodeStatus::Allocated, NodeStatus::Idle]
    );

    for node in &nodes {
        assert_eq!(node.cpus_free, node.cpus_total - node.cpus_alloc);
        assert_eq!(node.memory_free, node.memory_total - node.memory_alloc);
    }

    let g001 = &nodes[3];
    assert!(g001.has_gpu);
    assert_eq!((g001.gpu_type.as_deref(), g001.gpu_count), (Some("a100"), 4));
    assert_eq!(g001.partitions, vec!["gpu", "lab_chen"]);

    let c001 = &nodes[0];
    assert!(!c001.has_gpu);
    assert_eq!(c001.gpu_count, 0);
    assert_eq!(c001.features, vec!["skylake", "ib"]);
}

#[test]
fn test_parsing_is_idempotent() {
    assert_eq!(parse_nodes(NODES), parse_nodes(NODES));
    assert_eq!(parse_partitions(PARTITIONS), parse_partitions(PARTITIONS));
    assert_eq!(parse_queue(QUEUE), parse_queue(QUEUE));
}

#[test]
fn test_empty_text_yields_no_records() {
    assert!(parse_nodes("").is_empty());
    assert!(parse_partitions("").is_empty());
    assert!(parse_queue("").is_empty());
    assert!(gpu_summary(&[]).is_empty());
}

#[test]
fn test_partition_rows() {
    let partitions = parse_partitions(PARTITIONS);

    assert_eq!(partitions.len(), 11);
    assert!(partitions.iter().filter(|p| p.name == "batch").all(|p| p.is_default));
    assert!(!partitions.iter().any(|p| p.name.ends_with('*')));

    let lab = partitions.iter().find(|p| p.name == "lab_ahmed").unwrap();
    assert!(!lab.available);
    assert_eq!(lab.state, "n/a");
}

#[test]
fn test_queue_rows() {
    let jobs = parse_queue(QUEUE);

    assert_eq!(jobs.len(), 3);
    assert_eq!(jobs[1].job_id, "81002");
    assert_eq!((jobs[1].nodes, jobs[1].cpus), (2, 40));
    assert_eq!(jobs[1].time, "1-02:03:04");
    assert_eq!(jobs[1].reason, "c002,g003");
    assert!(jobs.iter().all(|job| job.user == "alice" && job.is_running()));
}

#[test]
fn test_pending_reason_is_not_split() {
    let text = "JOBID NAME USER ST TIME NODES CPUS PARTITION NODELIST(REASON)\n\
        90001 big_mpi bob PD 0:00 16 512 mpi Resources,Priority\n\
        90002 dep_job bob PD 0:00 1 4 batch (Dependency) waiting on 90001\n";
    let jobs = parse_queue(text);

    assert_eq!(jobs[0].reason, "Resources,Priority");
    assert_eq!(jobs[1].reason, "(Dependency) waiting on 90001");
    assert_eq!(jobs[1].partition, "batch");
}

#[test]
fn test_reference_order_example() {
    let text = "PARTITION AVAIL TIMELIMIT NODES STATE\n\
        zeta up infinite 1 idle\n\
        batch* up 1-00:00:00 1 idle\n\
        alpha up infinite 1 idle\n\
        gpu up 1-00:00:00 1 idle\n";
    let order = PartitionOrder::new(["batch", "gpu", "mpi", "interactive", "largemem", "preempt"].iter().map(|s| s.to_string()).collect());

    let summary = partition_summary(&parse_partitions(text), &[], &order);

    assert_eq!(summary.keys().collect::<Vec<_>>(), vec!["batch", "gpu", "alpha", "zeta"]);
}
