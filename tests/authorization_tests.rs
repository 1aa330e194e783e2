//! Tests for the admin/employee ownership model

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use rust_decimal_macros::dec;

use parkgate::clock::FixedClock;
use parkgate::Clock;
use parkgate::{
    AccessEngine, EventCatalog, Facility, FacilityRegistry, NewEvent, NewFacility, NewUser,
    ParkingError, Principal, RateSchedule, Role, Store, UserDirectory,
};

struct TestSystem {
    clock: Arc<FixedClock>,
    directory: UserDirectory,
    registry: FacilityRegistry,
    catalog: EventCatalog,
    engine: AccessEngine,
}

fn system() -> TestSystem {
    let store = Arc::new(Store::new());
    let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()));
    TestSystem {
        clock: Arc::clone(&clock),
        directory: UserDirectory::new(Arc::clone(&store)),
        registry: FacilityRegistry::new(Arc::clone(&store)),
        catalog: EventCatalog::new(Arc::clone(&store)),
        engine: AccessEngine::new(Arc::clone(&store), clock),
    }
}

fn admin(sys: &TestSystem, login: &str) -> Principal {
    sys.directory.bootstrap_admin(format!("Admin {login}"), login).unwrap()
}

fn employee(sys: &TestSystem, admin: &Principal, login: &str) -> Principal {
    sys.directory
        .create(
            NewUser {
                name: format!("Employee {login}"),
                login: login.to_string(),
                role: Role::Employee,
            },
            admin,
        )
        .unwrap()
}

fn garage(sys: &TestSystem, owner: &Principal, name: &str) -> Facility {
    sys.registry
        .create(
            NewFacility {
                name: name.to_string(),
                address: None,
                capacity: 10,
                rates: RateSchedule {
                    first_hour: dec!(10.00),
                    additional_hour: dec!(5.00),
                    daily: dec!(50.00),
                },
            },
            owner,
        )
        .unwrap()
}

#[test]
fn test_employee_operates_in_its_admins_scope() {
    let sys = system();
    let boss = admin(&sys, "boss");
    let staff = employee(&sys, &boss, "staff");
    let facility = garage(&sys, &boss, "Boss Garage");

    // The employee can register entries and exits on the admin's facility,
    // and the records are stamped with the admin's id.
    let access = sys.engine.register_entry("EMP1234", facility.id, &staff).unwrap();
    assert_eq!(access.owner, boss.id);

    sys.clock.advance(Duration::minutes(20));
    let closed = sys.engine.register_exit(access.id, &staff).unwrap();
    assert_eq!(closed.total_fee, Some(dec!(10.00)));

    // Both see the same record
    assert_eq!(sys.engine.list(&boss).len(), 1);
    assert_eq!(sys.engine.list(&staff).len(), 1);
}

#[test]
fn test_foreign_admin_is_locked_out() {
    let sys = system();
    let boss = admin(&sys, "boss");
    let rival = admin(&sys, "rival");
    let facility = garage(&sys, &boss, "Boss Garage");

    let err = sys.engine.register_entry("XYZ0001", facility.id, &rival).unwrap_err();
    assert!(matches!(err, ParkingError::Forbidden(_)));

    let access = sys.engine.register_entry("XYZ0002", facility.id, &boss).unwrap();
    assert!(matches!(
        sys.engine.register_exit(access.id, &rival).unwrap_err(),
        ParkingError::Forbidden(_)
    ));
    assert!(matches!(
        sys.engine.get(access.id, &rival).unwrap_err(),
        ParkingError::Forbidden(_)
    ));

    // Listings are disjoint
    assert_eq!(sys.engine.list(&boss).len(), 1);
    assert!(sys.engine.list(&rival).is_empty());
}

#[test]
fn test_foreign_employee_is_locked_out() {
    let sys = system();
    let boss = admin(&sys, "boss");
    let rival = admin(&sys, "rival");
    let rival_staff = employee(&sys, &rival, "rival-staff");
    let facility = garage(&sys, &boss, "Boss Garage");

    let err = sys.engine.register_entry("XYZ0003", facility.id, &rival_staff).unwrap_err();
    assert!(matches!(err, ParkingError::Forbidden(_)));
    assert!(sys.engine.list(&rival_staff).is_empty());
}

#[test]
fn test_orphan_employee_sees_empty_listings_not_errors() {
    let sys = system();
    let boss = admin(&sys, "boss");
    garage(&sys, &boss, "Boss Garage");

    // An employee created without a manager link (data from before the
    // explicit manager model) has no admin scope at all.
    let orphan = Principal {
        id: parkgate::UserId::new(),
        name: "Orphan".to_string(),
        login: "orphan".to_string(),
        role: Role::Employee,
        manager: None,
    };

    assert!(sys.engine.list(&orphan).is_empty());
    assert!(sys.engine.ledger_entries(&orphan).is_empty());
    assert!(sys.catalog.list(&orphan).is_empty());
    assert!(sys.registry.list(&orphan).is_empty());
}

#[test]
fn test_orphan_employee_cannot_touch_records() {
    let sys = system();
    let boss = admin(&sys, "boss");
    let facility = garage(&sys, &boss, "Boss Garage");
    let access = sys.engine.register_entry("XYZ0004", facility.id, &boss).unwrap();

    let orphan = Principal {
        id: parkgate::UserId::new(),
        name: "Orphan".to_string(),
        login: "orphan".to_string(),
        role: Role::Employee,
        manager: None,
    };

    assert!(matches!(
        sys.engine.register_entry("XYZ0005", facility.id, &orphan).unwrap_err(),
        ParkingError::Forbidden(_)
    ));
    assert!(matches!(
        sys.engine.get(access.id, &orphan).unwrap_err(),
        ParkingError::Forbidden(_)
    ));
}

#[test]
fn test_only_admins_create_facilities_events_and_users() {
    let sys = system();
    let boss = admin(&sys, "boss");
    let staff = employee(&sys, &boss, "staff");
    let facility = garage(&sys, &boss, "Boss Garage");

    let err = sys
        .registry
        .create(
            NewFacility {
                name: "Staff Garage".to_string(),
                address: None,
                capacity: 5,
                rates: RateSchedule {
                    first_hour: dec!(1.00),
                    additional_hour: dec!(1.00),
                    daily: dec!(1.00),
                },
            },
            &staff,
        )
        .unwrap_err();
    assert!(matches!(err, ParkingError::Forbidden(_)));

    let now = sys.clock.now();
    let err = sys
        .catalog
        .create(
            NewEvent {
                name: "Staff Party".to_string(),
                facility: facility.id,
                starts_at: now,
                ends_at: now + Duration::hours(1),
                flat_fee: None,
            },
            &staff,
        )
        .unwrap_err();
    assert!(matches!(err, ParkingError::Forbidden(_)));

    let err = sys
        .directory
        .create(
            NewUser {
                name: "Nested".to_string(),
                login: "nested".to_string(),
                role: Role::Employee,
            },
            &staff,
        )
        .unwrap_err();
    assert!(matches!(err, ParkingError::Forbidden(_)));
}

#[test]
fn test_employee_can_read_and_update_its_admins_events() {
    let sys = system();
    let boss = admin(&sys, "boss");
    let staff = employee(&sys, &boss, "staff");
    let facility = garage(&sys, &boss, "Boss Garage");

    let now = sys.clock.now();
    let event = sys
        .catalog
        .create(
            NewEvent {
                name: "Matinee".to_string(),
                facility: facility.id,
                starts_at: now,
                ends_at: now + Duration::hours(2),
                flat_fee: Some(dec!(12.00)),
            },
            &boss,
        )
        .unwrap();

    assert_eq!(sys.catalog.get(event.id, &staff).unwrap().name, "Matinee");

    let updated = sys
        .catalog
        .update(
            event.id,
            parkgate::EventUpdate {
                name: Some("Matinee Moved".to_string()),
                ..Default::default()
            },
            &staff,
        )
        .unwrap();
    assert_eq!(updated.name, "Matinee Moved");
}

#[test]
fn test_directory_visibility_follows_management() {
    let sys = system();
    let boss = admin(&sys, "boss");
    let rival = admin(&sys, "rival");
    let staff = employee(&sys, &boss, "staff");

    // The admin sees itself and its employee
    let seen: Vec<_> = sys.directory.list(&boss).iter().map(|u| u.id).collect();
    assert!(seen.contains(&boss.id));
    assert!(seen.contains(&staff.id));
    assert!(!seen.contains(&rival.id));

    // The employee sees only itself
    let seen: Vec<_> = sys.directory.list(&staff).iter().map(|u| u.id).collect();
    assert_eq!(seen, vec![staff.id]);

    // Cross-admin lookups are forbidden
    assert!(matches!(
        sys.directory.get(staff.id, &rival).unwrap_err(),
        ParkingError::Forbidden(_)
    ));
    assert_eq!(sys.directory.get(staff.id, &boss).unwrap().login, "staff");
}

#[test]
fn test_duplicate_login_is_a_conflict() {
    let sys = system();
    let boss = admin(&sys, "boss");
    let err = sys.directory.bootstrap_admin("Another", "boss").unwrap_err();
    assert!(matches!(err, ParkingError::Conflict(_)));

    employee(&sys, &boss, "staff");
    let err = sys
        .directory
        .create(
            NewUser {
                name: "Dup".to_string(),
                login: "staff".to_string(),
                role: Role::Employee,
            },
            &boss,
        )
        .unwrap_err();
    assert!(matches!(err, ParkingError::Conflict(_)));
}
