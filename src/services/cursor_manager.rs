// src/services/cursor_manager.rs

use crate::models::sales::{Pagination, PAGE_SIZE};

// Estado de paginação por cursor.
// `history` guarda, em ordem, o cursor que produziu cada página anterior
// (None = primeira página). Voltar = desempilhar e buscar de novo.
#[derive(Debug, Clone)]
pub struct CursorManager {
    page_index: u32,
    after_token: Option<String>,
    before_token: Option<String>,
    current: Option<String>,
    history: Vec<Option<String>>,
    has_next_page: bool,
}

impl Default for CursorManager {
    fn default() -> Self {
        Self {
            page_index: 1,
            after_token: None,
            before_token: None,
            current: None,
            history: Vec::new(),
            has_next_page: false,
        }
    }
}

impl CursorManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Volta para a página 1, sem cursores.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Registra os tokens de uma resposta bem-sucedida.
    pub fn record_page(&mut self, pagination: &Pagination, row_count: usize) {
        self.after_token = non_empty(pagination.after.as_deref());
        self.before_token = non_empty(pagination.before.as_deref());
        self.has_next_page = row_count == PAGE_SIZE;
    }

    pub fn can_advance(&self) -> bool {
        self.after_token.is_some()
    }

    pub fn can_retreat(&self) -> bool {
        self.page_index > 1
    }

    /// Avança uma página e devolve o cursor com que buscar.
    pub fn advance(&mut self) -> Option<String> {
        let after = self.after_token.clone()?;
        self.history.push(self.current.replace(after.clone()));
        self.page_index += 1;
        Some(after)
    }

    /// Volta uma página. `Some(None)` significa buscar a primeira página.
    pub fn retreat(&mut self) -> Option<Option<String>> {
        if !self.can_retreat() {
            return None;
        }
        let previous = self.history.pop().unwrap_or(None);
        self.current = previous.clone();
        self.page_index -= 1;
        Some(previous)
    }

    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    pub fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    pub fn after_token(&self) -> Option<&str> {
        self.after_token.as_deref()
    }

    pub fn before_token(&self) -> Option<&str> {
        self.before_token.as_deref()
    }
}

fn non_empty(token: Option<&str>) -> Option<String> {
    token.filter(|t| !t.is_empty()).map(str::to_string)
}
