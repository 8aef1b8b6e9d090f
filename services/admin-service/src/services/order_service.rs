// Mutasi status order mengikuti pola transaksional yang sama dengan refund:
// verifikasi keberadaan row, update, audit record, satu commit.

use std::sync::Arc;

use crate::domain::order::{OrderDetail, OrderListItem, OrderListQuery};
use crate::error::AppError;
use crate::repositories::order_repo::OrderLedger;

#[derive(Clone)]
pub struct OrderService {
    ledger: Arc<dyn OrderLedger>,
}

impl OrderService {
    pub fn new(ledger: Arc<dyn OrderLedger>) -> Self {
        Self { ledger }
    }

    pub async fn order_detail(&self, order_id: i64) -> Result<OrderDetail, AppError> {
        self.ledger
            .order_detail(order_id)
            .await?
            .ok_or_else(|| AppError::not_found("order not found"))
    }

    pub async fn list_orders(
        &self,
        query: &OrderListQuery,
    ) -> Result<(Vec<OrderListItem>, i64), AppError> {
        self.ledger.list_orders(query).await
    }

    pub async fn update_order_status(
        &self,
        order_id: i64,
        status: i32,
        reason: &str,
        admin_id: i64,
        ip: &str,
    ) -> Result<(), AppError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(AppError::validation("reason is required"));
        }

        self.ledger
            .update_order_status(order_id, status, reason, admin_id, ip)
            .await?;

        tracing::info!(
            "order status updated: order_id={}, status={}, admin_id={}",
            order_id,
            status,
            admin_id
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct OrderState {
        statuses: HashMap<i64, i32>,
        operations: Vec<(i64, String, String, String)>,
    }

    #[derive(Default)]
    struct InMemoryOrderLedger {
        state: Mutex<OrderState>,
    }

    impl InMemoryOrderLedger {
        fn with_order(id: i64, status: i32) -> Arc<Self> {
            let ledger = Self::default();
            ledger.state.lock().unwrap().statuses.insert(id, status);
            Arc::new(ledger)
        }
    }

    #[async_trait]
    impl OrderLedger for InMemoryOrderLedger {
        async fn order_detail(&self, id: i64) -> Result<Option<OrderDetail>, AppError> {
            let state = self.state.lock().unwrap();
            Ok(state.statuses.get(&id).map(|status| OrderDetail {
                id,
                order_no: format!("ORD{}", id),
                user_id: 1,
                amount: 99.0,
                status: *status,
                created_at: Utc::now(),
                items: Vec::new(),
                payments: Vec::new(),
            }))
        }

        async fn list_orders(
            &self,
            _query: &OrderListQuery,
        ) -> Result<(Vec<OrderListItem>, i64), AppError> {
            Ok((Vec::new(), 0))
        }

        async fn update_order_status(
            &self,
            order_id: i64,
            status: i32,
            reason: &str,
            admin_id: i64,
            ip: &str,
        ) -> Result<(), AppError> {
            let mut state = self.state.lock().unwrap();
            if !state.statuses.contains_key(&order_id) {
                return Err(AppError::not_found("order not found"));
            }
            state.statuses.insert(order_id, status);
            state.operations.push((
                admin_id,
                "order".to_string(),
                format!("update_status_{}", status),
                format!("{}|{}", reason, ip),
            ));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_update_status_writes_audit_record() {
        let ledger = InMemoryOrderLedger::with_order(10, 0);
        let svc = OrderService::new(ledger.clone());

        svc.update_order_status(10, 2, "payment dispute", 7, "10.0.0.1")
            .await
            .unwrap();

        let state = ledger.state.lock().unwrap();
        assert_eq!(state.statuses[&10], 2);
        assert_eq!(state.operations.len(), 1);
        assert_eq!(state.operations[0].1, "order");
        assert_eq!(state.operations[0].2, "update_status_2");
    }

    #[tokio::test]
    async fn test_any_status_may_follow_any_other() {
        // Tidak ada state machine untuk order status; transisi bebas
        let ledger = InMemoryOrderLedger::with_order(10, 3);
        let svc = OrderService::new(ledger.clone());

        for status in [0, 2, 1, 3, 0] {
            svc.update_order_status(10, status, "manual correction", 7, "10.0.0.1")
                .await
                .unwrap();
            assert_eq!(ledger.state.lock().unwrap().statuses[&10], status);
        }
    }

    #[tokio::test]
    async fn test_update_unknown_order_not_found() {
        let ledger = InMemoryOrderLedger::with_order(10, 0);
        let svc = OrderService::new(ledger.clone());

        let err = svc
            .update_order_status(999, 1, "missing", 7, "10.0.0.1")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFoundError(_)));
        assert!(ledger.state.lock().unwrap().operations.is_empty());
    }

    #[tokio::test]
    async fn test_blank_reason_rejected_before_ledger() {
        let ledger = InMemoryOrderLedger::with_order(10, 0);
        let svc = OrderService::new(ledger.clone());

        let err = svc
            .update_order_status(10, 1, "  ", 7, "10.0.0.1")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(ledger.state.lock().unwrap().statuses[&10], 0);
    }
}
