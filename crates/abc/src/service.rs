use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockwise_core::TenantId;

use crate::classifier::{Classifier, ClassifierError};
use crate::result::AbcReport;
use crate::usage::ItemUsage;

/// Tenant scope for execution.
///
/// - `Any`: serve any tenant (shared worker).
/// - `Tenant`: only accept requests for the specified tenant (single-tenant
///   worker / safe initialization).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TenantScope {
    Any,
    Tenant(TenantId),
}

impl TenantScope {
    pub fn allows(&self, tenant_id: TenantId) -> bool {
        match self {
            TenantScope::Any => true,
            TenantScope::Tenant(t) => *t == tenant_id,
        }
    }
}

/// One tenant-scoped classification request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationRequest {
    pub tenant_id: TenantId,
    pub requested_at: DateTime<Utc>,
    pub items: Vec<ItemUsage>,
}

impl ClassificationRequest {
    pub fn new(tenant_id: TenantId, items: Vec<ItemUsage>) -> Self {
        Self {
            tenant_id,
            requested_at: Utc::now(),
            items,
        }
    }
}

/// Runs a classifier under a tenant scope, with tracing around each call.
///
/// Storage/runtime agnostic: callers provide the request, the service only
/// enforces scope and logs the outcome.
pub struct ClassificationService {
    scope: TenantScope,
    classifier: Box<dyn Classifier>,
}

impl ClassificationService {
    pub fn new(scope: TenantScope, classifier: Box<dyn Classifier>) -> Self {
        Self { scope, classifier }
    }

    pub fn for_tenant(tenant_id: TenantId, classifier: Box<dyn Classifier>) -> Self {
        Self::new(TenantScope::Tenant(tenant_id), classifier)
    }

    pub fn scope(&self) -> TenantScope {
        self.scope
    }

    pub fn run(&self, request: &ClassificationRequest) -> Result<AbcReport, ClassifierError> {
        if !self.scope.allows(request.tenant_id) {
            return Err(ClassifierError::ScopeViolation);
        }

        let span = tracing::info_span!(
            "abc.classify",
            tenant_id = %request.tenant_id,
            classifier = self.classifier.name(),
            items = request.items.len(),
        );
        let _guard = span.enter();

        let report = self.classifier.classify(&request.items)?;

        tracing::info!(
            tier_a = report.categories.a.len(),
            tier_b = report.categories.b.len(),
            tier_c = report.categories.c.len(),
            total_value = report.total_value,
            "classification complete"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::AbcEngine;
    use crate::tier::Tier;
    use stockwise_core::ItemId;

    fn service_for(scope: TenantScope) -> ClassificationService {
        ClassificationService::new(scope, Box::new(AbcEngine::default()))
    }

    #[test]
    fn rejects_out_of_scope_tenant() {
        let service = service_for(TenantScope::Tenant(TenantId::new()));
        let request = ClassificationRequest::new(TenantId::new(), vec![]);

        let err = service.run(&request).unwrap_err();
        match err {
            ClassifierError::ScopeViolation => {}
            other => panic!("expected ScopeViolation, got {other:?}"),
        }
    }

    #[test]
    fn scoped_service_accepts_its_tenant() {
        let tenant_id = TenantId::new();
        let service = ClassificationService::for_tenant(tenant_id, Box::new(AbcEngine::default()));
        let request = ClassificationRequest::new(
            tenant_id,
            vec![ItemUsage::valued(1, 800.0), ItemUsage::valued(2, 200.0)],
        );

        let report = service.run(&request).unwrap();
        assert_eq!(report.categories.tier_of(ItemId::new(1)), Some(Tier::A));
        assert_eq!(report.count, 2);
    }

    #[test]
    fn shared_service_accepts_any_tenant() {
        let service = service_for(TenantScope::Any);
        let request = ClassificationRequest::new(TenantId::new(), vec![]);
        assert!(service.run(&request).is_ok());
    }
}
