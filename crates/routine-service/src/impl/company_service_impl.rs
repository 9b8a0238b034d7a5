//! Company service implementation.

use super::{ordering_for, selection_for};
use crate::company_service::CompanyService;
use crate::dto::{
    normalize_filter, CompanyAddDto, CompanyDto, CompanyDtoParameters, ShapedResource,
};
use async_trait::async_trait;
use routine_config::PagingConfig;
use routine_core::{
    collect_field_errors, Company, CompanyId, FieldError, PageRequest, PagedList,
    PropertyMappingRegistry, RoutineError, RoutineResult, ValidateExt,
};
use routine_repository::{CompanyFilter, CompanyRepository};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};
use validator::Validate;

/// Company service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = CompanyService)]
pub struct CompanyServiceImpl {
    #[shaku(inject)]
    company_repository: Arc<dyn CompanyRepository>,
    mappings: Arc<PropertyMappingRegistry>,
    paging: PagingConfig,
}

impl CompanyServiceImpl {
    /// Creates a new company service.
    #[must_use]
    pub fn new(
        company_repository: Arc<dyn CompanyRepository>,
        mappings: Arc<PropertyMappingRegistry>,
        paging: PagingConfig,
    ) -> Self {
        Self {
            company_repository,
            mappings,
            paging,
        }
    }
}

/// Validates every request of a batch, prefixing paths with the item index.
fn validate_batch(requests: &[CompanyAddDto]) -> RoutineResult<()> {
    if requests.is_empty() {
        return Err(RoutineError::validation(
            "at least one company is required",
            vec![FieldError {
                field: "companies".to_string(),
                message: "at least one company is required".to_string(),
                code: "length".to_string(),
            }],
        ));
    }

    let mut errors = Vec::new();
    for (index, request) in requests.iter().enumerate() {
        if let Err(e) = request.validate() {
            errors.extend(collect_field_errors(&e).into_iter().map(|mut error| {
                error.field = format!("[{}].{}", index, error.field);
                error
            }));
        }
    }

    if errors.is_empty() {
        return Ok(());
    }
    let message = errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");
    Err(RoutineError::validation(message, errors))
}

#[async_trait]
impl CompanyService for CompanyServiceImpl {
    async fn list_companies(
        &self,
        parameters: &CompanyDtoParameters,
    ) -> RoutineResult<PagedList<ShapedResource<CompanyId>>> {
        debug!("Listing companies: {:?}", parameters);

        let ordering =
            ordering_for::<CompanyDto, Company>(&self.mappings, parameters.order_by_or_default())?;
        let fields = selection_for::<CompanyDto>(parameters.fields.as_deref())?;
        let page = PageRequest::from_query(
            parameters.page_number,
            parameters.page_size,
            self.paging.limits(),
        )?;

        let filter = CompanyFilter {
            company_name: normalize_filter(parameters.company_name.as_deref()),
            search_term: normalize_filter(parameters.search_term.as_deref()),
            ordering,
        };
        let PagedList {
            items,
            total_count,
            page_size,
            current_page,
            total_pages,
        } = self.company_repository.find_page(&filter, page).await?;

        let items = items
            .into_iter()
            .map(|company| ShapedResource::shape(company.id, &CompanyDto::from(company), &fields))
            .collect::<RoutineResult<Vec<_>>>()?;

        Ok(PagedList {
            items,
            total_count,
            page_size,
            current_page,
            total_pages,
        })
    }

    async fn get_company(
        &self,
        id: CompanyId,
        fields: Option<&str>,
    ) -> RoutineResult<ShapedResource<CompanyId>> {
        debug!("Getting company: {}", id);

        let fields = selection_for::<CompanyDto>(fields)?;
        let company = self
            .company_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| RoutineError::not_found("Company", id))?;

        ShapedResource::shape(id, &CompanyDto::from(company), &fields)
    }

    async fn get_companies(&self, ids: &[CompanyId]) -> RoutineResult<Vec<CompanyDto>> {
        debug!("Getting {} companies by id", ids.len());

        let mut unique = ids.to_vec();
        unique.sort_unstable();
        unique.dedup();

        let companies = self.company_repository.find_by_ids(&unique).await?;
        if let Some(missing) = unique
            .iter()
            .find(|id| !companies.iter().any(|company| company.id == **id))
        {
            return Err(RoutineError::not_found("Company", missing));
        }

        Ok(companies.into_iter().map(CompanyDto::from).collect())
    }

    async fn create_company(&self, request: CompanyAddDto) -> RoutineResult<CompanyDto> {
        debug!("Creating company: {}", request.name);

        request.validate_request()?;

        let (company, employees) = request.into_entities();
        self.company_repository.save(&company, &employees).await?;

        info!("Company created: {} ({})", company.name, company.id);
        Ok(CompanyDto::from(company))
    }

    async fn create_companies(
        &self,
        requests: Vec<CompanyAddDto>,
    ) -> RoutineResult<Vec<CompanyDto>> {
        debug!("Creating {} companies", requests.len());

        validate_batch(&requests)?;

        let batch: Vec<_> = requests
            .into_iter()
            .map(CompanyAddDto::into_entities)
            .collect();
        self.company_repository.save_all(&batch).await?;

        info!("{} companies created", batch.len());
        Ok(batch
            .into_iter()
            .map(|(company, _)| CompanyDto::from(company))
            .collect())
    }

    async fn delete_company(&self, id: CompanyId) -> RoutineResult<()> {
        debug!("Deleting company: {}", id);

        if !self.company_repository.delete(id).await? {
            return Err(RoutineError::not_found("Company", id));
        }

        info!("Company deleted: {}", id);
        Ok(())
    }

    async fn company_exists(&self, id: CompanyId) -> RoutineResult<bool> {
        self.company_repository.exists(id).await
    }
}

impl std::fmt::Debug for CompanyServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompanyServiceImpl")
            .field("mappings", &self.mappings)
            .field("paging", &self.paging)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_registry;
    use routine_core::Employee;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    /// Repository that only counts how often it was reached.
    #[derive(Default)]
    struct CountingCompanyRepository {
        calls: AtomicUsize,
    }

    impl CountingCompanyRepository {
        fn touch(&self) {
            self.calls.fetch_add(1, AtomicOrdering::SeqCst);
        }

        fn calls(&self) -> usize {
            self.calls.load(AtomicOrdering::SeqCst)
        }
    }

    #[async_trait]
    impl CompanyRepository for CountingCompanyRepository {
        async fn find_page(
            &self,
            _filter: &CompanyFilter,
            page: PageRequest,
        ) -> RoutineResult<PagedList<Company>> {
            self.touch();
            Ok(PagedList::new(Vec::new(), 0, page))
        }

        async fn find_by_id(&self, _id: CompanyId) -> RoutineResult<Option<Company>> {
            self.touch();
            Ok(None)
        }

        async fn find_by_ids(&self, _ids: &[CompanyId]) -> RoutineResult<Vec<Company>> {
            self.touch();
            Ok(Vec::new())
        }

        async fn exists(&self, _id: CompanyId) -> RoutineResult<bool> {
            self.touch();
            Ok(false)
        }

        async fn save(&self, _company: &Company, _employees: &[Employee]) -> RoutineResult<()> {
            self.touch();
            Ok(())
        }

        async fn save_all(&self, _companies: &[(Company, Vec<Employee>)]) -> RoutineResult<()> {
            self.touch();
            Ok(())
        }

        async fn delete(&self, _id: CompanyId) -> RoutineResult<bool> {
            self.touch();
            Ok(false)
        }
    }

    fn service() -> (CompanyServiceImpl, Arc<CountingCompanyRepository>) {
        let repository = Arc::new(CountingCompanyRepository::default());
        let service = CompanyServiceImpl::new(
            repository.clone(),
            Arc::new(build_registry().unwrap()),
            PagingConfig::default(),
        );
        (service, repository)
    }

    fn params(order_by: Option<&str>, fields: Option<&str>) -> CompanyDtoParameters {
        CompanyDtoParameters {
            order_by: order_by.map(str::to_string),
            fields: fields.map(str::to_string),
            ..CompanyDtoParameters::default()
        }
    }

    #[tokio::test]
    async fn test_unknown_order_by_never_reaches_storage() {
        let (service, repository) = service();

        let err = service
            .list_companies(&params(Some("unknownfield"), None))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(repository.calls(), 0);
    }

    #[tokio::test]
    async fn test_unknown_field_never_reaches_storage() {
        let (service, repository) = service();

        let err = service
            .list_companies(&params(None, Some("id,name")))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_QUERY");

        let err = service
            .get_company(CompanyId::new(), Some("bogus"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(repository.calls(), 0);
    }

    #[tokio::test]
    async fn test_bad_paging_never_reaches_storage() {
        let (service, repository) = service();

        let bad_page = CompanyDtoParameters {
            page_number: Some(0),
            ..CompanyDtoParameters::default()
        };
        assert_eq!(
            service.list_companies(&bad_page).await.unwrap_err().status_code(),
            400
        );
        assert_eq!(repository.calls(), 0);
    }

    #[tokio::test]
    async fn test_valid_query_reaches_storage_once() {
        let (service, repository) = service();

        let page = service
            .list_companies(&params(Some("country desc, companyname"), Some("id")))
            .await
            .unwrap();
        assert!(page.is_empty());
        assert_eq!(repository.calls(), 1);
    }

    #[tokio::test]
    async fn test_invalid_payload_never_reaches_storage() {
        let (service, repository) = service();

        let err = service
            .create_company(CompanyAddDto::default())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 422);

        let err = service.create_companies(Vec::new()).await.unwrap_err();
        assert_eq!(err.status_code(), 422);
        assert_eq!(repository.calls(), 0);
    }

    #[test]
    fn test_batch_errors_carry_item_index() {
        let requests = vec![
            CompanyAddDto {
                name: "Fine".to_string(),
                ..CompanyAddDto::default()
            },
            CompanyAddDto::default(),
        ];
        match validate_batch(&requests) {
            Err(RoutineError::Validation { errors, .. }) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].field.starts_with("[1]."));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
