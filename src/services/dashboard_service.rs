// src/services/dashboard_service.rs

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::{
    clients::SalesApi,
    common::error::AppError,
    middleware::session::Session,
    models::dashboard::{DashboardView, FilterSet, SortField},
    services::dashboard_controller::{DashboardController, FetchTicket},
};

// Mesma validade do cookie de sessão
const IDLE_TTL: Duration = Duration::from_secs(60 * 60 * 24);

type SharedController = Arc<Mutex<DashboardController>>;

struct Instance {
    controller: SharedController,
    last_seen: Instant,
}

/// Guarda um `DashboardController` por navegador (cookie `dashboard_id`) e
/// executa as buscas remotas que ele pede.
///
/// O lock do controller nunca fica preso durante a chamada HTTP; buscas
/// sobrepostas (mudanças rápidas de filtro) correm em paralelo e o número de
/// sequência do controller descarta as respostas antigas.
#[derive(Clone)]
pub struct DashboardService {
    sales: Arc<dyn SalesApi>,
    default_filters: FilterSet,
    instances: Arc<RwLock<HashMap<Uuid, Instance>>>,
}

impl DashboardService {
    pub fn new(sales: Arc<dyn SalesApi>, default_filters: FilterSet) -> Self {
        Self {
            sales,
            default_filters,
            instances: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    // Busca ou cria a instância. Devolve `true` quando ela acabou de ser criada.
    async fn instance(&self, id: Uuid, session: Session) -> (SharedController, bool) {
        let mut instances = self.instances.write().await;

        match instances.get_mut(&id) {
            Some(instance) => {
                instance.last_seen = Instant::now();
                instance.controller.lock().await.rebind_session(session);
                (instance.controller.clone(), false)
            }
            None => {
                instances.retain(|_, instance| instance.last_seen.elapsed() < IDLE_TTL);

                let controller = Arc::new(Mutex::new(DashboardController::new(
                    session,
                    self.default_filters.clone(),
                )));
                instances.insert(id, Instance {
                    controller: controller.clone(),
                    last_seen: Instant::now(),
                });
                tracing::info!("Nova instância de dashboard {} ({} ativas)", id, instances.len());
                (controller, true)
            }
        }
    }

    // Uma instância nova já faz a primeira carga.
    async fn open(&self, id: Uuid, session: Session) -> SharedController {
        let (controller, created) = self.instance(id, session).await;
        if created {
            let ticket = controller.lock().await.refresh();
            self.execute(&controller, ticket).await;
        }
        controller
    }

    async fn execute(&self, controller: &SharedController, ticket: FetchTicket) {
        let result = self.sales.list_sales(&ticket.token, &ticket.query).await;
        let applied = controller.lock().await.complete_fetch(ticket.seq, result);
        if !applied {
            tracing::info!("Resposta da busca {} chegou atrasada e foi ignorada", ticket.seq);
        }
    }

    async fn run(&self, controller: &SharedController, ticket: Option<FetchTicket>) -> DashboardView {
        if let Some(ticket) = ticket {
            self.execute(controller, ticket).await;
        }
        controller.lock().await.view()
    }

    pub async fn view(&self, id: Uuid, session: Session) -> DashboardView {
        let controller = self.open(id, session).await;
        controller.lock().await.view()
    }

    pub async fn update_filters(
        &self,
        id: Uuid,
        session: Session,
        filters: FilterSet,
    ) -> Result<DashboardView, AppError> {
        let filters = filters.normalized();
        filters.check()?;

        // Numa instância nova a própria mudança faz a primeira carga
        let (controller, created) = self.instance(id, session).await;
        let ticket = {
            let mut controller = controller.lock().await;
            match controller.set_filters(filters) {
                Some(ticket) => Some(ticket),
                None if created => Some(controller.refresh()),
                None => None,
            }
        };
        Ok(self.run(&controller, ticket).await)
    }

    pub async fn toggle_sort(&self, id: Uuid, session: Session, field: SortField) -> DashboardView {
        let (controller, _) = self.instance(id, session).await;
        let ticket = controller.lock().await.toggle_sort(field);
        self.run(&controller, Some(ticket)).await
    }

    pub async fn next_page(&self, id: Uuid, session: Session) -> DashboardView {
        let controller = self.open(id, session).await;
        let ticket = controller.lock().await.next_page();
        self.run(&controller, ticket).await
    }

    pub async fn prev_page(&self, id: Uuid, session: Session) -> DashboardView {
        let controller = self.open(id, session).await;
        let ticket = controller.lock().await.prev_page();
        self.run(&controller, ticket).await
    }
}
