//! Dashboard KPI tiles.
//!
//! Computed from the three dashboard fetches (all trains, open job cards,
//! expired certificates). Pure fan-in; the concurrent fetch lives in the
//! client crate.

use crate::model::{Certificate, ChangeType, JobCard, JobCardPriority, Kpi, Train};

/// Build the six dashboard tiles.
pub fn compute_kpis(
    trains: &[Train],
    open_job_cards: &[JobCard],
    expired_certificates: &[Certificate],
) -> Vec<Kpi> {
    let total_trains = trains.len();
    let operational = trains.iter().filter(|t| t.status.is_operational()).count();
    let maintenance = trains
        .iter()
        .filter(|t| t.status == crate::model::TrainStatus::Maintenance)
        .count();
    let retired = trains
        .iter()
        .filter(|t| t.status == crate::model::TrainStatus::Retired)
        .count();

    let pending_clearance = expired_certificates.len();
    let predicted_failures = open_job_cards
        .iter()
        .filter(|jc| jc.priority == JobCardPriority::High)
        .count();

    let pending_pct = if total_trains == 0 {
        "0%".to_string()
    } else {
        let pct = (pending_clearance as f64 / total_trains as f64 * 100.0).round() as i64;
        format!("{}%", pct)
    };

    vec![
        Kpi {
            title: "Total Trainsets".to_string(),
            value: total_trains.to_string(),
            change: String::new(),
            change_type: ChangeType::Increase,
            description: "Total operational fleet size".to_string(),
            filter_value: Some("all".to_string()),
        },
        Kpi {
            title: "Ready for Service".to_string(),
            value: operational.to_string(),
            change: "+1".to_string(),
            change_type: ChangeType::Increase,
            description: "Available for immediate deployment".to_string(),
            filter_value: Some("IN_SERVICE".to_string()),
        },
        Kpi {
            title: "Retired".to_string(),
            value: retired.to_string(),
            change: String::new(),
            change_type: ChangeType::Increase,
            description: "Retired from service".to_string(),
            filter_value: Some("RETIRED".to_string()),
        },
        Kpi {
            title: "In Maintenance".to_string(),
            value: maintenance.to_string(),
            change: String::new(),
            change_type: ChangeType::Increase,
            description: "Currently undergoing maintenance".to_string(),
            filter_value: Some("MAINTENANCE".to_string()),
        },
        Kpi {
            title: "Pending Clearance".to_string(),
            value: pending_pct,
            change: "+2%".to_string(),
            change_type: ChangeType::Increase,
            description: "Awaiting certificate clearance".to_string(),
            filter_value: None,
        },
        Kpi {
            title: "Predicted Failures".to_string(),
            value: predicted_failures.to_string(),
            change: "+1".to_string(),
            change_type: ChangeType::Increase,
            description: "In next 24 hours".to_string(),
            filter_value: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        CertificateStatus, Department, JobCardStatus, TrainStatus, WorkType,
    };

    fn train(id: i64, status: TrainStatus) -> Train {
        Train {
            train_id: id,
            train_number: format!("KM-{:02}", id),
            commissioning_date: None,
            status,
            depot_location: None,
            last_updated: None,
            current_odometer: 0.0,
            last_maintenance_date: None,
            odometer_at_last_maintenance: 0.0,
            maintenance_interval: 0.0,
            last_cleaning_date_time: None,
            cleaning_period: 0,
            daily_max_mileage: 0.0,
            job_cards: vec![],
            fitness_certificates: vec![],
            branding_assignments: vec![],
            cleaning_tasks: vec![],
            trip_histories: vec![],
        }
    }

    fn open_card(train_id: i64, priority: JobCardPriority) -> JobCard {
        JobCard {
            job_card_id: format!("JC-{}", train_id),
            train_id,
            trainset_id: None,
            asset_component: "GENERAL".to_string(),
            work_type: WorkType::Corrective,
            priority,
            status: JobCardStatus::Open,
            reported_date: None,
            target_completion_date: None,
            actual_start: None,
            actual_end: None,
            summary: "work".to_string(),
            details: String::new(),
            labor_hours_logged: 0.0,
            assigned_to: "Team-A".to_string(),
            supervisor_override: false,
            last_updated: None,
        }
    }

    fn expired_cert(id: &str) -> Certificate {
        Certificate {
            certificate_id: id.to_string(),
            certificate_number: id.to_string(),
            issue_date: None,
            expiry_date: None,
            status: CertificateStatus::Expired,
            is_renewal: false,
            previous_certificate_id: None,
            department: Department::RollingStock,
            issued_by: "RS Inspectorate".to_string(),
            approved_by: "Chief Engineer".to_string(),
            last_inspection_date: None,
            next_inspection_due: None,
            inspection_details: None,
            compliance_notes: None,
            remarks: None,
            last_updated: None,
        }
    }

    #[test]
    fn test_kpis_on_known_fleet() {
        let trains = vec![
            train(1, TrainStatus::InService),
            train(2, TrainStatus::Active),
            train(3, TrainStatus::Maintenance),
            train(4, TrainStatus::Retired),
        ];
        let open = vec![
            open_card(3, JobCardPriority::High),
            open_card(3, JobCardPriority::Low),
        ];
        let expired = vec![expired_cert("FC-1")];

        let kpis = compute_kpis(&trains, &open, &expired);
        assert_eq!(kpis.len(), 6);
        assert_eq!(kpis[0].value, "4"); // total
        assert_eq!(kpis[1].value, "2"); // IN_SERVICE + ACTIVE
        assert_eq!(kpis[2].value, "1"); // retired
        assert_eq!(kpis[3].value, "1"); // maintenance
        assert_eq!(kpis[4].value, "25%"); // 1 expired / 4 trains
        assert_eq!(kpis[5].value, "1"); // one HIGH-priority open card
    }

    #[test]
    fn test_empty_fleet_avoids_division_by_zero() {
        let kpis = compute_kpis(&[], &[], &[]);
        assert_eq!(kpis[4].value, "0%");
    }
}
