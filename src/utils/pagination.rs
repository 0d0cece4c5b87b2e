//! Paginación y ordenamiento de listados

use serde::{Deserialize, Serialize};

use super::errors::{AppError, AppResult};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Dirección de ordenamiento
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// `asc` (sin importar mayúsculas) es ascendente, cualquier otro valor descendente
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("asc") {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Query string de un listado paginado: `?page=0&size=10&sort=asc`
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
}

/// Solicitud de página ya validada
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub direction: SortDirection,
}

impl PageRequest {
    pub fn new(page: u32, size: u32, direction: SortDirection) -> AppResult<Self> {
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(AppError::BadRequest(format!(
                "Page size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        Ok(Self { page, size, direction })
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

impl TryFrom<PageQuery> for PageRequest {
    type Error = AppError;

    fn try_from(query: PageQuery) -> Result<Self, Self::Error> {
        let direction = query
            .sort
            .as_deref()
            .map(SortDirection::parse)
            .unwrap_or(SortDirection::Asc);
        PageRequest::new(
            query.page.unwrap_or(0),
            query.size.unwrap_or(DEFAULT_PAGE_SIZE),
            direction,
        )
    }
}

/// Página de resultados
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let size = u64::from(request.size);
        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages: total_elements.div_ceil(size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = PageRequest::try_from(PageQuery::default()).unwrap();
        assert_eq!(request.page, 0);
        assert_eq!(request.size, DEFAULT_PAGE_SIZE);
        assert_eq!(request.direction, SortDirection::Asc);
    }

    #[test]
    fn test_sort_direction() {
        assert_eq!(SortDirection::parse("ASC"), SortDirection::Asc);
        assert_eq!(SortDirection::parse("desc"), SortDirection::Desc);
        assert_eq!(SortDirection::parse("whatever"), SortDirection::Desc);
    }

    #[test]
    fn test_invalid_size() {
        assert!(PageRequest::new(0, 0, SortDirection::Asc).is_err());
        assert!(PageRequest::new(0, MAX_PAGE_SIZE + 1, SortDirection::Asc).is_err());
    }

    #[test]
    fn test_total_pages() {
        let request = PageRequest::new(2, 10, SortDirection::Asc).unwrap();
        assert_eq!(request.offset(), 20);

        let page = Page::new(vec![1, 2, 3], request, 23);
        assert_eq!(page.total_pages, 3);

        let empty: Page<i32> = Page::new(vec![], request, 0);
        assert_eq!(empty.total_pages, 0);
    }
}
