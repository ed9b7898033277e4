//! 组件扫描与依赖装配的集成测试

use config_impl::InMemoryBeanDefinitionSource;
use di_abstractions::{BeanOrigin, BeanProvider, CollisionPolicy};
use infrastructure_common::{DependencyError, InfrastructureError};
use infrastructure_composition::ApplicationContext;
use std::sync::Arc;

mod bank {
    pub mod dao {
        use component_macros::Bean;

        pub trait Ledger: Send + Sync {
            fn name(&self) -> &'static str;
        }

        #[derive(Debug, Default, Bean)]
        #[bean(implements(Ledger))]
        #[service(meta_data = "memory")]
        pub struct MemoryLedger;

        impl Ledger for MemoryLedger {
            fn name(&self) -> &'static str {
                "memory"
            }
        }

        #[derive(Debug, Default, Bean)]
        #[bean(implements(Ledger))]
        pub struct ArchiveLedger;

        impl Ledger for ArchiveLedger {
            fn name(&self) -> &'static str {
                "archive"
            }
        }

        #[derive(Debug, Default, Bean)]
        #[service("auditLog")]
        pub struct AuditLog;

        #[derive(Debug, Default, Bean)]
        #[service]
        pub struct RateTable;
    }

    pub mod service {
        use super::dao::{AuditLog, Ledger};
        use component_macros::Bean;
        use infrastructure_common::Autowired;

        pub trait Teller: Send + Sync {
            fn ledger_name(&self) -> Option<&'static str>;
            fn has_audit(&self) -> bool;
        }

        #[derive(Debug, Default, Bean)]
        #[bean(implements(Teller))]
        #[service]
        pub struct CounterTeller {
            #[autowired]
            ledger: Autowired<dyn Ledger>,
            #[autowired("auditLog")]
            audit: Autowired<AuditLog>,
        }

        impl Teller for CounterTeller {
            fn ledger_name(&self) -> Option<&'static str> {
                self.ledger.get().map(|ledger| ledger.name())
            }

            fn has_audit(&self) -> bool {
                self.audit.is_wired()
            }
        }
    }
}

mod outside {
    use crate::bank::dao::RateTable;
    use component_macros::Bean;
    use infrastructure_common::Autowired;

    #[derive(Debug, Default, Bean)]
    #[service]
    pub struct Stray {
        #[autowired]
        rate_table: Autowired<RateTable>,
    }
}

use bank::dao::{Ledger, MemoryLedger};
use bank::service::Teller;

const BANK: &str = concat!(module_path!(), "::bank");

#[test]
fn test_scan_derives_ids() {
    let context = ApplicationContext::builder().scan(BANK).build().unwrap();

    assert_eq!(
        context.bean_ids(),
        vec!["auditLog", "ledger", "rateTable", "teller"]
    );
    assert!(!context.contains_bean("archiveLedger"));
    assert!(!context.contains_bean("stray"));

    let ledger = context.describe("ledger").unwrap();
    assert_eq!(ledger.origin, BeanOrigin::Scanned);
    assert_eq!(ledger.meta_data.as_deref(), Some("memory"));
}

#[test]
fn test_scan_wires_fields() {
    let context = ApplicationContext::builder().scan(BANK).build().unwrap();
    assert_eq!(context.report().wired, 2);

    let teller = context.get::<dyn Teller>("teller").unwrap();
    assert_eq!(teller.ledger_name(), Some("memory"));
    assert!(teller.has_audit());

    let ledger = context.get::<dyn Ledger>("ledger").unwrap();
    assert!(Arc::ptr_eq(
        &ledger,
        &context.get::<dyn Ledger>("ledger").unwrap()
    ));
}

#[test]
fn test_field_name_is_used_verbatim() {
    let result = ApplicationContext::builder().scan(module_path!()).build();

    match result {
        Err(InfrastructureError::DependencyError {
            source: DependencyError::MissingBean { owner, field, id },
        }) => {
            assert_eq!(owner, "stray");
            assert_eq!(field, "rate_table");
            assert_eq!(id, "rate_table");
        }
        other => panic!("预期依赖缺失错误, 实际: {:?}", other.map(|c| c.bean_ids())),
    }
}

#[test]
fn test_collision_rejected_by_default() {
    let result = ApplicationContext::builder()
        .add_definitions(
            InMemoryBeanDefinitionSource::new("declared")
                .bean("ledger", concat!(module_path!(), "::bank::dao::ArchiveLedger")),
        )
        .scan(BANK)
        .build();

    assert!(matches!(
        result,
        Err(InfrastructureError::DependencyError {
            source: DependencyError::DuplicateBeanId { .. }
        })
    ));
}

#[test]
fn test_collision_overwrite_prefers_scanned() {
    let context = ApplicationContext::builder()
        .add_definitions(
            InMemoryBeanDefinitionSource::new("declared")
                .bean("ledger", concat!(module_path!(), "::bank::dao::ArchiveLedger")),
        )
        .scan(BANK)
        .on_collision(CollisionPolicy::Overwrite)
        .build()
        .unwrap();

    assert_eq!(context.describe("ledger").unwrap().origin, BeanOrigin::Scanned);
    assert!(context.get::<MemoryLedger>("ledger").is_ok());
    assert_eq!(
        context.get::<dyn Teller>("teller").unwrap().ledger_name(),
        Some("memory")
    );
}

#[test]
fn test_collision_keep_first_prefers_declared() {
    let context = ApplicationContext::builder()
        .add_definitions(
            InMemoryBeanDefinitionSource::new("declared")
                .bean("ledger", concat!(module_path!(), ".bank.dao.ArchiveLedger")),
        )
        .scan(BANK)
        .on_collision(CollisionPolicy::KeepFirst)
        .build()
        .unwrap();

    assert_eq!(
        context.describe("ledger").unwrap().origin,
        BeanOrigin::Declarative
    );
    // 扫描阶段保留声明的实例，装配使用同一实例
    assert_eq!(
        context.get::<dyn Teller>("teller").unwrap().ledger_name(),
        Some("archive")
    );
}
