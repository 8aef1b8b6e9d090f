// Workflow engine + query facade untuk payment.
//
// Semua mutasi state payment lewat sini: precondition dicek, transaksi
// ledger dijalankan, cache di-invalidate, audit record tertulis dalam
// transaksi yang sama. Read path memakai pola cache-aside: cache dulu,
// fallback ke ledger, tulis balik ke cache saat miss.

use std::sync::Arc;

use crate::cache::{payment_detail_key, PaymentCache, PAYMENT_DETAIL_TTL_SECONDS};
use crate::domain::payment::{
    CreateRefundRequest, PaymentDetail, PaymentListItem, PaymentListQuery, PaymentRefund,
};
use crate::error::AppError;
use crate::repositories::payment_repo::PaymentLedger;

#[derive(Clone)]
pub struct PaymentService {
    ledger: Arc<dyn PaymentLedger>,
    cache: Arc<dyn PaymentCache>,
}

impl PaymentService {
    pub fn new(ledger: Arc<dyn PaymentLedger>, cache: Arc<dyn PaymentCache>) -> Self {
        Self { ledger, cache }
    }

    /// Terbitkan refund terhadap satu payment. Transisi state yang sah
    /// hanya paid -> refunded; sisanya ditolak di dalam transaksi ledger.
    pub async fn create_refund(
        &self,
        payment_id: i64,
        request: &CreateRefundRequest,
        admin_id: i64,
        ip: &str,
    ) -> Result<PaymentRefund, AppError> {
        // Validasi upstream sudah menolak nilai ini; tetap dicek ulang di
        // sini karena engine adalah pemilik terakhir invariant-nya
        if !shared::utils::validation::is_valid_amount(request.amount) {
            return Err(AppError::validation("refund amount must be positive"));
        }

        let reason = request.reason.trim();
        if reason.is_empty() {
            return Err(AppError::validation("refund reason is required"));
        }

        let refund = self
            .ledger
            .create_refund(payment_id, request.amount, reason, admin_id, ip)
            .await?;

        tracing::info!(
            "refund created: payment_id={}, refund_no={}, amount={}, admin_id={}",
            payment_id,
            refund.refund_no,
            refund.amount,
            admin_id
        );

        // Invalidate cache setelah commit. Mutasi sudah durable; cache yang
        // gagal dihapus akan expire sendiri lewat TTL, jadi cukup dicatat
        let key = payment_detail_key(payment_id);
        if let Err(e) = self.cache.delete(&key).await {
            tracing::warn!("failed to invalidate cached payment detail {}: {}", key, e);
        }

        Ok(refund)
    }

    /// Detail payment dengan pola cache-aside. Cache hit tidak menyentuh
    /// ledger sama sekali; payload yang rusak diperlakukan sebagai miss.
    pub async fn payment_detail(&self, payment_id: i64) -> Result<PaymentDetail, AppError> {
        let key = payment_detail_key(payment_id);

        match self.cache.get(&key).await {
            Ok(Some(raw)) => match serde_json::from_str::<PaymentDetail>(&raw) {
                Ok(detail) => return Ok(detail),
                Err(e) => {
                    tracing::warn!("discarding malformed cached payment detail {}: {}", key, e)
                }
            },
            Ok(None) => {}
            Err(e) => tracing::warn!(
                "payment detail cache read failed, falling back to ledger: {}",
                e
            ),
        }

        let detail = self
            .ledger
            .payment_detail(payment_id)
            .await?
            .ok_or_else(|| AppError::not_found("payment record not found"))?;

        match serde_json::to_string(&detail) {
            Ok(payload) => {
                if let Err(e) = self
                    .cache
                    .set_ex(&key, &payload, PAYMENT_DETAIL_TTL_SECONDS)
                    .await
                {
                    tracing::warn!("failed to cache payment detail {}: {}", key, e);
                }
            }
            Err(e) => tracing::warn!("failed to serialize payment detail {}: {}", key, e),
        }

        Ok(detail)
    }

    /// List pembayaran: murni read ledger, tanpa keterlibatan cache
    pub async fn list_payments(
        &self,
        query: &PaymentListQuery,
    ) -> Result<(Vec<PaymentListItem>, i64), AppError> {
        self.ledger.list_payments(query).await
    }
}
