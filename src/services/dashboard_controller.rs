// src/services/dashboard_controller.rs

use crate::{
    common::error::AppError,
    middleware::session::Session,
    models::{
        dashboard::{DashboardView, FilterSet, SortField, SortSpec},
        sales::{build_chart_series, ChartPoint, SalesListResponse, SalesQuery, SalesRow, TotalSales, PAGE_SIZE},
    },
    services::cursor_manager::CursorManager,
};

pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch sales data. Please try again.";

// O que o serviço precisa para fazer a chamada remota fora do lock.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    pub seq: u64,
    pub token: String,
    pub query: SalesQuery,
}

/// Estado de uma instância do dashboard: filtros, ordenação, paginação e a
/// última página recebida. Não faz I/O; cada mutação devolve um
/// [`FetchTicket`] que o chamador executa e entrega em [`complete_fetch`].
///
/// [`complete_fetch`]: DashboardController::complete_fetch
#[derive(Debug)]
pub struct DashboardController {
    session: Session,
    filters: FilterSet,
    sort: SortSpec,
    cursor: CursorManager,
    rows: Vec<SalesRow>,
    chart: Vec<ChartPoint>,
    total_sales: Option<TotalSales>,
    loading: bool,
    error: Option<String>,
    // Sequência monotônica: só a resposta do último pedido é aplicada
    request_seq: u64,
}

impl DashboardController {
    pub fn new(session: Session, filters: FilterSet) -> Self {
        Self {
            session,
            filters,
            sort: SortSpec::default(),
            cursor: CursorManager::new(),
            rows: Vec::new(),
            chart: Vec::new(),
            total_sales: None,
            loading: false,
            error: None,
            request_seq: 0,
        }
    }

    pub fn rebind_session(&mut self, session: Session) {
        self.session = session;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn begin_fetch(&mut self, after: Option<&str>, before: Option<&str>) -> FetchTicket {
        self.loading = true;
        self.error = None;
        self.request_seq += 1;

        FetchTicket {
            seq: self.request_seq,
            token: self.session.token().to_string(),
            query: SalesQuery::new(&self.filters, &self.sort, after, before),
        }
    }

    /// Aplica o resultado de um pedido. Devolve `false` quando a resposta é
    /// de um pedido antigo e foi descartada.
    pub fn complete_fetch(&mut self, seq: u64, result: Result<SalesListResponse, AppError>) -> bool {
        if seq != self.request_seq {
            tracing::debug!("Resposta fora de ordem descartada (seq {} < {})", seq, self.request_seq);
            return false;
        }

        match result {
            Ok(response) => {
                let rows = response.results.sales;
                self.cursor.record_page(&response.pagination, rows.len());
                self.chart = build_chart_series(&rows);
                self.total_sales = response.results.total_sales;
                self.rows = rows;
            }
            Err(e) => {
                // As linhas da página anterior continuam visíveis.
                tracing::warn!("Erro ao buscar vendas: {}", e);
                self.error = Some(FETCH_ERROR_MESSAGE.to_string());
            }
        }

        self.loading = false;
        true
    }

    /// Primeira carga: página 1, sem cursor.
    pub fn refresh(&mut self) -> FetchTicket {
        self.cursor.reset();
        self.begin_fetch(None, None)
    }

    pub fn set_filters(&mut self, filters: FilterSet) -> Option<FetchTicket> {
        if self.filters == filters {
            return None;
        }
        self.filters = filters;
        Some(self.refresh())
    }

    pub fn toggle_sort(&mut self, field: SortField) -> FetchTicket {
        self.sort = self.sort.toggled(field);
        self.refresh()
    }

    pub fn next_page(&mut self) -> Option<FetchTicket> {
        if self.loading || !self.cursor.can_advance() {
            return None;
        }
        let after = self.cursor.advance()?;
        Some(self.begin_fetch(Some(&after), None))
    }

    pub fn prev_page(&mut self) -> Option<FetchTicket> {
        if self.loading || !self.cursor.can_retreat() {
            return None;
        }
        let previous = self.cursor.retreat()?;
        Some(self.begin_fetch(previous.as_deref(), None))
    }

    pub fn view(&self) -> DashboardView {
        let page = self.cursor.page_index();
        DashboardView {
            filters: self.filters.clone(),
            sort: self.sort,
            page,
            first_row_number: (page - 1) * PAGE_SIZE as u32 + 1,
            rows: self.rows.clone(),
            chart: self.chart.clone(),
            total_sales: self.total_sales.clone(),
            loading: self.loading,
            error: self.error.clone(),
            has_next_page: self.cursor.has_next_page(),
            can_go_next: !self.loading && self.cursor.has_next_page() && self.cursor.can_advance(),
            can_go_prev: !self.loading && self.cursor.can_retreat(),
            after_token: self.cursor.after_token().map(str::to_string),
            before_token: self.cursor.before_token().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        dashboard::SortOrder,
        sales::{Pagination, SalesResults},
    };
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn controller() -> DashboardController {
        DashboardController::new(
            Session::new("abc123"),
            FilterSet::new(day(2025, 1, 1), day(2025, 1, 1)),
        )
    }

    fn response(count: usize, after: Option<&str>, before: Option<&str>) -> SalesListResponse {
        let sales = (0..count)
            .map(|i| SalesRow {
                id: format!("sale-{i}"),
                date: Utc.with_ymd_and_hms(2025, 1, 1, (i % 24) as u32, 0, 0).unwrap(),
                customer_email: format!("c{i}@example.com"),
                customer_phone: "555".into(),
                price: Decimal::new(1000, 2),
            })
            .collect();
        SalesListResponse {
            results: SalesResults { sales, total_sales: None },
            pagination: Pagination {
                after: after.map(String::from),
                before: before.map(String::from),
            },
        }
    }

    fn load(c: &mut DashboardController, count: usize, after: Option<&str>, before: Option<&str>) {
        let ticket = c.refresh();
        assert!(c.complete_fetch(ticket.seq, Ok(response(count, after, before))));
    }

    #[test]
    fn begin_fetch_sets_loading_and_clears_error() {
        let mut c = controller();
        let ticket = c.refresh();
        c.complete_fetch(ticket.seq, Err(AppError::FetchFailed { status: 500 }));
        assert!(c.view().error.is_some());

        let ticket = c.refresh();
        let view = c.view();
        assert!(view.loading);
        assert_eq!(view.error, None);
        assert_eq!(ticket.token, "abc123");
    }

    #[test]
    fn full_page_enables_next_and_disables_prev() {
        let mut c = controller();
        load(&mut c, PAGE_SIZE, Some("c2"), None);

        let view = c.view();
        assert_eq!(view.rows.len(), PAGE_SIZE);
        assert!(view.has_next_page);
        assert!(view.can_go_next);
        assert!(!view.can_go_prev);
        assert!(!view.loading);
    }

    #[test]
    fn short_page_has_no_next_page() {
        let mut c = controller();
        load(&mut c, PAGE_SIZE - 1, Some("c2"), None);
        assert!(!c.view().has_next_page);
        assert!(!c.view().can_go_next);
    }

    #[test]
    fn filter_change_resets_pagination_before_fetching() {
        let mut c = controller();
        load(&mut c, PAGE_SIZE, Some("c2"), None);
        let ticket = c.next_page().unwrap();
        c.complete_fetch(ticket.seq, Ok(response(PAGE_SIZE, Some("c3"), Some("b2"))));
        assert_eq!(c.view().page, 2);

        let mut filters = FilterSet::new(day(2025, 1, 1), day(2025, 1, 31));
        filters.email = Some("alice".into());
        let ticket = c.set_filters(filters).unwrap();

        let view = c.view();
        assert_eq!(view.page, 1);
        assert_eq!(view.after_token, None);
        assert_eq!(view.before_token, None);
        assert_eq!(ticket.query.after, "");
        assert_eq!(ticket.query.before, "");
        assert_eq!(ticket.query.end_date, "2025-01-31");
        assert_eq!(ticket.query.email, "alice");
    }

    #[test]
    fn identical_filters_do_not_refetch() {
        let mut c = controller();
        assert!(c.set_filters(FilterSet::new(day(2025, 1, 1), day(2025, 1, 1))).is_none());
    }

    #[test]
    fn toggling_sort_refetches_with_new_order_and_no_cursor() {
        let mut c = controller();
        load(&mut c, PAGE_SIZE, Some("c2"), None);
        let ticket = c.next_page().unwrap();
        c.complete_fetch(ticket.seq, Ok(response(PAGE_SIZE, Some("c3"), None)));

        let ticket = c.toggle_sort(SortField::Date);

        assert_eq!(ticket.query.sort_by, "date");
        assert_eq!(ticket.query.sort_order, "desc");
        assert_eq!(ticket.query.after, "");
        assert_eq!(c.view().page, 1);
        assert_eq!(c.view().sort.order, SortOrder::Desc);
    }

    #[test]
    fn next_page_is_noop_without_forward_cursor() {
        let mut c = controller();
        load(&mut c, PAGE_SIZE, None, None);
        assert!(c.next_page().is_none());
        assert_eq!(c.view().page, 1);
    }

    #[test]
    fn prev_page_is_noop_on_first_page() {
        let mut c = controller();
        load(&mut c, PAGE_SIZE, Some("c2"), None);
        assert!(c.prev_page().is_none());
        assert_eq!(c.view().page, 1);
    }

    #[test]
    fn navigation_is_noop_while_fetch_in_flight() {
        let mut c = controller();
        load(&mut c, PAGE_SIZE, Some("c2"), None);
        let _pending = c.refresh();
        assert!(c.next_page().is_none());
        assert!(c.prev_page().is_none());
    }

    #[test]
    fn next_then_prev_uses_cursor_stack() {
        let mut c = controller();
        load(&mut c, PAGE_SIZE, Some("c2"), None);

        let ticket = c.next_page().unwrap();
        assert_eq!(ticket.query.after, "c2");
        c.complete_fetch(ticket.seq, Ok(response(PAGE_SIZE, Some("c3"), Some("b2"))));

        let ticket = c.next_page().unwrap();
        assert_eq!(ticket.query.after, "c3");
        c.complete_fetch(ticket.seq, Ok(response(10, None, Some("b3"))));
        assert_eq!(c.view().page, 3);
        assert_eq!(c.view().first_row_number, 101);

        let ticket = c.prev_page().unwrap();
        assert_eq!(ticket.query.after, "c2");
        c.complete_fetch(ticket.seq, Ok(response(PAGE_SIZE, Some("c3"), Some("b2"))));
        assert_eq!(c.view().page, 2);

        let ticket = c.prev_page().unwrap();
        assert_eq!(ticket.query.after, "");
        assert_eq!(ticket.query.before, "");
        assert_eq!(c.view().page, 1);
    }

    #[test]
    fn failed_fetch_keeps_previous_rows() {
        let mut c = controller();
        load(&mut c, 5, None, None);

        let ticket = c.refresh();
        assert!(c.complete_fetch(ticket.seq, Err(AppError::FetchFailed { status: 500 })));

        let view = c.view();
        assert_eq!(view.error.as_deref(), Some(FETCH_ERROR_MESSAGE));
        assert!(!view.loading);
        assert_eq!(view.rows.len(), 5);
        assert_eq!(view.chart.len(), 1);
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut c = controller();
        let first = c.refresh();
        let second = c.toggle_sort(SortField::Price);

        assert!(c.complete_fetch(second.seq, Ok(response(3, None, None))));
        assert!(!c.complete_fetch(first.seq, Ok(response(PAGE_SIZE, Some("old"), None))));

        let view = c.view();
        assert_eq!(view.rows.len(), 3);
        assert_eq!(view.after_token, None);
    }

    #[test]
    fn stale_response_does_not_clear_loading() {
        let mut c = controller();
        let first = c.refresh();
        let _second = c.toggle_sort(SortField::Price);
        c.complete_fetch(first.seq, Ok(response(3, None, None)));
        assert!(c.view().loading);
        assert!(c.view().rows.is_empty());
    }

    #[test]
    fn chart_is_recomputed_from_current_page() {
        let mut c = controller();
        load(&mut c, 4, None, None);
        let view = c.view();
        // Uma venda por hora: um ponto por horário
        assert_eq!(view.chart.len(), 4);
        assert!(view.chart.iter().all(|p| p.total == Decimal::new(1000, 2)));

        load(&mut c, 1, None, None);
        assert_eq!(c.view().chart.len(), 1);
    }

    #[test]
    fn rebinding_session_changes_fetch_token() {
        let mut c = controller();
        c.rebind_session(Session::new("fresh"));
        assert_eq!(c.refresh().token, "fresh");
    }
}
