use super::*;
use crate::build_info::BuildInfo;

#[test]
fn test_create_table() {
    let cluster = MemoryCluster::new();
    let provisioner = test_provisioner(cluster.clone(), test_config());
    let split_keys = vec![b"\x00\x01".to_vec(), b"\x00\x02".to_vec()];

    provisioner
        .create_table(&test_segment(test_families()), &split_keys)
        .unwrap();

    let table = cluster.table(TABLE_NAME).expect("table should exist");
    assert_eq!(table.families().len(), 2);
    assert_eq!(cluster.split_keys(TABLE_NAME), Some(split_keys));
    assert_eq!(
        cluster.stats(),
        ClusterStats {
            connections_opened: 1,
            connections_closed: 1,
            close_attempts: 1,
            create_calls: 1,
        }
    );
}

#[test]
fn test_table_tags() {
    let cluster = MemoryCluster::new();
    let provisioner = test_provisioner(cluster.clone(), test_config())
        .with_build_info(BuildInfo::new(Some("commit:9f1c2ab; branch:main".into())));

    provisioner
        .create_table(&test_segment(test_families()), &[])
        .unwrap();

    let table = cluster.table(TABLE_NAME).unwrap();
    assert_eq!(table.split_policy(), Some(DISABLED_SPLIT_POLICY));
    assert_eq!(table.value(tags::HOST), Some("kylin_metadata"));
    assert_eq!(table.value(tags::CREATION_TIME), Some("1700000000000"));
    assert_eq!(table.value(tags::HOST_OWNER), Some("data-team@example.com"));
    assert_eq!(table.value(tags::GIT_TAG), Some("commit:9f1c2ab; branch:main"));
    assert_eq!(table.value(tags::USER), Some("ADMIN"));
    assert_eq!(
        table.value(tags::SEGMENT),
        Some("sales_cube[20240101000000_20240201000000]")
    );
}

#[test]
fn test_optional_tags_omitted() {
    let config = ProvisionConfig {
        owner: Some(String::new()),
        ..test_config()
    };
    let provisioner = test_provisioner(MemoryCluster::new(), config);

    let descriptor = provisioner.describe(&test_segment(test_families()));
    assert_eq!(descriptor.value(tags::HOST_OWNER), None);
    assert_eq!(descriptor.value(tags::GIT_TAG), None);
    assert_eq!(descriptor.value(tags::USER), Some("ADMIN"));
}

#[test]
fn test_secure_cluster_adds_bulk_load_endpoint() {
    let secure = test_provisioner(MemoryCluster::new().with_security(true), test_config());
    let descriptor = secure.describe(&test_segment(test_families()));
    assert!(descriptor.has_coprocessor(SECURE_BULK_LOAD_ENDPOINT));

    let plain = test_provisioner(MemoryCluster::new(), test_config());
    let descriptor = plain.describe(&test_segment(test_families()));
    assert!(descriptor.coprocessors().is_empty());
}

#[test]
fn test_jar_deployer_attaches_endpoint() {
    let config = ProvisionConfig {
        coprocessor_jar: Some("hdfs:///kylin/coprocessor/kylin-coprocessor.jar".into()),
        ..test_config()
    };
    let cluster = MemoryCluster::new().with_security(true);
    let deployer = JarCoprocessorDeployer::from_config(&config);
    let provisioner = test_provisioner(cluster.clone(), config).with_deployer(deployer);

    provisioner
        .create_table(&test_segment(test_families()), &[])
        .unwrap();

    let table = cluster.table(TABLE_NAME).unwrap();
    let coprocessors = table.coprocessors();
    assert_eq!(coprocessors.len(), 2);
    assert_eq!(coprocessors[0].class_name, SECURE_BULK_LOAD_ENDPOINT);
    assert_eq!(coprocessors[1].class_name, crate::config::DEFAULT_COPROCESSOR_CLASS);
    assert_eq!(coprocessors[1].priority, Some(ENDPOINT_PRIORITY));
}

#[test]
fn test_jar_deployer_without_jar() {
    let mut descriptor = TableDescriptor::new(TABLE_NAME);
    JarCoprocessorDeployer::from_config(&test_config())
        .deploy(&mut descriptor, DEFAULT_LOG_TARGET)
        .unwrap();
    assert!(descriptor.coprocessors().is_empty());
}

#[test]
fn test_no_families() {
    let cluster = MemoryCluster::new();
    let provisioner = test_provisioner(cluster.clone(), test_config());

    provisioner.create_table(&test_segment(Vec::new()), &[]).unwrap();

    assert!(cluster.table(TABLE_NAME).unwrap().families().is_empty());
    assert_eq!(cluster.split_keys(TABLE_NAME), Some(Vec::new()));
}

#[test]
fn test_guard_closes_once() {
    let cluster = MemoryCluster::new();
    {
        let admin = cluster.connect().unwrap();
        let mut guard = AdminGuard::new(admin, DEFAULT_LOG_TARGET);
        assert!(!guard.table_exists(TABLE_NAME).unwrap());
    }
    assert_eq!(cluster.stats().connections_closed, 1);
    assert_eq!(cluster.stats().close_attempts, 1);

    let mut admin = cluster.connect().unwrap();
    admin.close().unwrap();
    assert!(matches!(admin.close(), Err(AdminError::Closed)));
    let stats = cluster.stats();
    assert_eq!(stats.connections_closed, 2);
    assert_eq!(stats.close_attempts, 3);
}

#[test]
fn test_manual_close_through_guard_is_counted() {
    let cluster = MemoryCluster::new();
    {
        let mut guard = AdminGuard::new(cluster.connect().unwrap(), DEFAULT_LOG_TARGET);
        guard.close().unwrap();
    }
    let stats = cluster.stats();
    assert_eq!(stats.connections_closed, 1);
    assert_eq!(stats.close_attempts, 2);
}
