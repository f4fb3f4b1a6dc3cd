use crate::domain::sales::{SalesByDay, SalesSummary, TopClients, fill_missing_days};
use crate::gateway::SalesReader;
use crate::services::{ServiceError, ServiceResult, require_session};
use crate::session::SessionHandle;

pub const LOAD_DASHBOARD_FAILED: &str = "Failed to load dashboard";

/// Data required to render the dashboard.
#[derive(Debug)]
pub struct DashboardData {
    pub summary: SalesSummary,
    /// One bar per calendar day, zero-filled between the first and last sale.
    pub sales_by_day: Vec<SalesByDay>,
    pub top_clients: TopClients,
}

/// Fetches daily sales and top clients concurrently and aggregates them.
///
/// Both calls must succeed; nothing is returned from a partial result.
pub async fn load_dashboard<R>(repo: &R, session: &SessionHandle) -> ServiceResult<DashboardData>
where
    R: SalesReader + ?Sized,
{
    require_session(session)?;

    let (days, top_clients) = tokio::try_join!(repo.daily_sales(), repo.top_clients())
        .map_err(|err| {
            log::error!("Failed to load dashboard data: {err}");
            ServiceError::backend(LOAD_DASHBOARD_FAILED, err)
        })?;

    Ok(DashboardData {
        summary: SalesSummary::from_days(&days),
        sales_by_day: fill_missing_days(&days),
        top_clients,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::gateway::errors::GatewayError;
    use crate::gateway::mock::MockGateway;
    use crate::services::test_support::{client, signed_in};

    fn top_clients() -> TopClients {
        TopClients {
            highest_volume_client: client("1", "Ana"),
            highest_average_client: client("2", "Bia"),
            highest_frequency_client: client("3", "Caio"),
        }
    }

    fn day(d: u32, total: f64) -> SalesByDay {
        SalesByDay {
            date: NaiveDate::from_ymd_opt(2024, 3, d).unwrap(),
            total,
        }
    }

    #[tokio::test]
    async fn combines_both_statistics() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_daily_sales()
            .times(1)
            .returning(|| Ok(vec![day(1, 100.0), day(3, 300.0)]));
        gateway
            .expect_top_clients()
            .times(1)
            .returning(|| Ok(top_clients()));

        let data = load_dashboard(&gateway, &signed_in()).await.unwrap();

        assert_eq!(data.summary.total, 400.0);
        assert_eq!(data.summary.average, 200.0);
        assert_eq!(data.summary.active_days, 2);
        assert_eq!(data.summary.best_day, Some(day(3, 300.0)));
        assert_eq!(
            data.sales_by_day,
            vec![day(1, 100.0), day(2, 0.0), day(3, 300.0)]
        );
        assert_eq!(data.top_clients.highest_volume_client.name, "Ana");
    }

    #[tokio::test]
    async fn one_failed_call_fails_the_dashboard() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_daily_sales()
            .returning(|| Ok(vec![day(1, 100.0)]));
        gateway
            .expect_top_clients()
            .returning(|| Err(GatewayError::Transport("reset".into())));

        let err = load_dashboard(&gateway, &signed_in()).await.unwrap_err();

        assert_eq!(err.to_string(), LOAD_DASHBOARD_FAILED);
    }

    #[tokio::test]
    async fn requires_session() {
        let mut gateway = MockGateway::new();
        gateway.expect_daily_sales().never();
        gateway.expect_top_clients().never();

        let err = load_dashboard(&gateway, &SessionHandle::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Unauthorized));
    }
}
