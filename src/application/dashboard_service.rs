// Dashboard service - Use case for composing tabs out of the survey snapshot
use crate::application::survey_repository::SurveyRepository;
use crate::domain::dashboard::{
    ChartKind, ChartSpec, Dashboard, Panel, PanelData, Selector, SelectorOption, Tab, TabSummary,
    TabView, ValueFormat,
};
use crate::domain::occasion::OccasionProfile;
use crate::domain::snapshot::{Dataset, DatasetId, SurveySnapshot};
use std::sync::Arc;
use thiserror::Error;

const VIEW_SELECTOR: &str = "view";
const OCCASION_SELECTOR: &str = "occasion";

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("unknown tab: {0}")]
    UnknownTab(String),

    #[error("unknown view: {0}")]
    UnknownView(String),

    #[error("unknown commemorative date: {0}")]
    UnknownOccasion(String),

    #[error("unknown dataset: {0}")]
    UnknownDataset(String),

    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

/// The three time views of the behavior tab, in selector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BehaviorView {
    Channels,
    Motivators,
    MediaHabits,
}

impl BehaviorView {
    const ALL: [BehaviorView; 3] = [
        BehaviorView::Channels,
        BehaviorView::Motivators,
        BehaviorView::MediaHabits,
    ];

    fn dataset(&self) -> DatasetId {
        match self {
            BehaviorView::Channels => DatasetId::Channels,
            BehaviorView::Motivators => DatasetId::Motivators,
            BehaviorView::MediaHabits => DatasetId::MediaHabits,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            BehaviorView::Channels => "Canais de compra ao longo do tempo",
            BehaviorView::Motivators => "Motivadores de compra ao longo do tempo",
            BehaviorView::MediaHabits => "Hábitos de mídia ao longo do tempo",
        }
    }

    fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.dataset().slug() == slug)
    }
}

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn SurveyRepository>,
    title: String,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn SurveyRepository>, title: String) -> Self {
        Self { repository, title }
    }

    pub async fn get_dashboard(&self) -> anyhow::Result<Dashboard> {
        let snapshot = self.repository.snapshot().await?;

        let tabs = Tab::ALL
            .into_iter()
            .map(|tab| TabSummary {
                slug: tab.slug().to_string(),
                title: tab.title().to_string(),
                selector: default_selector(tab, &snapshot),
            })
            .collect();

        Ok(Dashboard::new(self.title.clone(), snapshot.buckets.clone(), tabs))
    }

    /// Build one tab. `view` drives the behavior tab, `occasion` the occasions
    /// tab; both fall back to the first option and are ignored elsewhere.
    pub async fn get_tab(
        &self,
        slug: &str,
        view: Option<&str>,
        occasion: Option<&str>,
    ) -> Result<TabView, DashboardError> {
        let tab = Tab::from_slug(slug).ok_or_else(|| DashboardError::UnknownTab(slug.to_string()))?;
        let snapshot = self.repository.snapshot().await?;

        let (selector, panels) = match tab {
            Tab::Behavior => behavior_panels(&snapshot, view)?,
            Tab::Consumption => (None, consumption_panels(&snapshot)),
            Tab::SpendIntent => (None, spend_intent_panels(&snapshot)),
            Tab::Competition => (None, competition_panels(&snapshot)),
            Tab::Occasions => occasion_panels(&snapshot, occasion)?,
        };

        tracing::debug!("Built tab {} with {} panels", slug, panels.len());

        Ok(TabView {
            slug: tab.slug().to_string(),
            title: tab.title().to_string(),
            selector,
            panels,
        })
    }

    pub async fn get_dataset(&self, slug: &str) -> Result<Dataset, DashboardError> {
        let id = DatasetId::from_slug(slug).ok_or_else(|| DashboardError::UnknownDataset(slug.to_string()))?;
        let snapshot = self.repository.snapshot().await?;
        Ok(snapshot.dataset(id))
    }

    pub async fn list_occasions(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.repository.snapshot().await?.occasion_names())
    }
}

fn default_selector(tab: Tab, snapshot: &SurveySnapshot) -> Option<Selector> {
    match tab {
        Tab::Behavior => Some(behavior_selector(BehaviorView::Channels)),
        Tab::Occasions => snapshot
            .occasions
            .first()
            .map(|first| occasion_selector(snapshot, &first.name)),
        _ => None,
    }
}

fn behavior_selector(selected: BehaviorView) -> Selector {
    Selector {
        name: VIEW_SELECTOR.to_string(),
        prompt: "Selecione o tipo de visão:".to_string(),
        options: BehaviorView::ALL
            .into_iter()
            .map(|v| SelectorOption {
                value: v.dataset().slug().to_string(),
                label: v.label().to_string(),
            })
            .collect(),
        selected: selected.dataset().slug().to_string(),
    }
}

fn occasion_selector(snapshot: &SurveySnapshot, selected: &str) -> Selector {
    Selector {
        name: OCCASION_SELECTOR.to_string(),
        prompt: "Selecione uma data comemorativa:".to_string(),
        options: snapshot
            .occasion_names()
            .into_iter()
            .map(|name| SelectorOption {
                value: name.clone(),
                label: name,
            })
            .collect(),
        selected: selected.to_string(),
    }
}

fn behavior_panels(
    snapshot: &SurveySnapshot,
    view: Option<&str>,
) -> Result<(Option<Selector>, Vec<Panel>), DashboardError> {
    let view = match view {
        None => BehaviorView::Channels,
        Some(slug) => BehaviorView::from_slug(slug).ok_or_else(|| DashboardError::UnknownView(slug.to_string()))?,
    };

    let dataset = snapshot.dataset(view.dataset());
    let panel = Panel {
        chart: time_chart(
            view.dataset().slug(),
            view.label(),
            ChartKind::Line,
            "proportion",
            "Participação (%)",
            dimension_of(&dataset),
            ValueFormat::Percent,
        ),
        data: PanelData::Dataset(dataset),
    };

    Ok((Some(behavior_selector(view)), vec![panel]))
}

fn consumption_panels(snapshot: &SurveySnapshot) -> Vec<Panel> {
    let purpose = Panel {
        chart: time_chart(
            DatasetId::Purpose.slug(),
            "Consumo próprio vs presentear (ao longo do tempo)",
            ChartKind::StackedArea,
            "proportion",
            "Participação (%)",
            &snapshot.purpose.dimension,
            ValueFormat::Percent,
        ),
        data: PanelData::Dataset(snapshot.dataset(DatasetId::Purpose)),
    };

    let ticket = Panel {
        chart: time_chart(
            DatasetId::RegionalTicket.slug(),
            "Ticket médio por região (R$/mês)",
            ChartKind::Line,
            "value",
            "Ticket médio (R$)",
            &snapshot.regional_ticket.dimension,
            ValueFormat::Currency,
        ),
        data: PanelData::Dataset(snapshot.dataset(DatasetId::RegionalTicket)),
    };

    vec![purpose, ticket]
}

fn spend_intent_panels(snapshot: &SurveySnapshot) -> Vec<Panel> {
    let intent = Panel {
        chart: category_bar(
            DatasetId::SpendIntent.slug(),
            "Quanto pretende gastar em roupas no próximo mês",
            "Faixa de gasto",
            "Participação (%)",
        ),
        data: PanelData::Dataset(snapshot.dataset(DatasetId::SpendIntent)),
    };

    let share = Panel {
        chart: category_bar(
            DatasetId::NonEssentialShare.slug(),
            "Share-roupas dentro do gasto em não essenciais",
            "Categoria não essencial",
            "Share (%)",
        ),
        data: PanelData::Dataset(snapshot.dataset(DatasetId::NonEssentialShare)),
    };

    vec![intent, share]
}

fn competition_panels(snapshot: &SurveySnapshot) -> Vec<Panel> {
    vec![Panel {
        chart: time_chart(
            DatasetId::BrandConsideration.slug(),
            "Nível de consideração ao longo do tempo",
            ChartKind::Line,
            "value",
            "Consideração (%)",
            &snapshot.brand_consideration.dimension,
            ValueFormat::Percent,
        ),
        data: PanelData::Dataset(snapshot.dataset(DatasetId::BrandConsideration)),
    }]
}

fn occasion_panels(
    snapshot: &SurveySnapshot,
    occasion: Option<&str>,
) -> Result<(Option<Selector>, Vec<Panel>), DashboardError> {
    let profile: &OccasionProfile = match occasion {
        Some(name) => snapshot
            .occasion(name)
            .ok_or_else(|| DashboardError::UnknownOccasion(name.to_string()))?,
        None => snapshot
            .occasions
            .first()
            .ok_or_else(|| DashboardError::UnknownOccasion("<none configured>".to_string()))?,
    };

    let territories = Panel {
        chart: ChartSpec {
            id: "territories".to_string(),
            title: format!("Territórios de marca – {}", profile.name),
            kind: ChartKind::Radar,
            x_field: "label".to_string(),
            x_title: "Território".to_string(),
            y_field: "score".to_string(),
            y_title: "Score".to_string(),
            color_field: None,
            color_title: None,
            format: ValueFormat::Plain,
            value_domain: Some((0.0, 1.0)),
            show_points: false,
        },
        data: PanelData::Scores {
            scores: profile.territories.clone(),
        },
    };

    let drivers = Panel {
        chart: ChartSpec {
            id: "drivers".to_string(),
            title: format!("Drivers de consumo – {}", profile.name),
            kind: ChartKind::HorizontalBar,
            x_field: "score".to_string(),
            x_title: "Força do driver".to_string(),
            y_field: "label".to_string(),
            y_title: "Driver".to_string(),
            color_field: None,
            color_title: None,
            format: ValueFormat::Percent,
            value_domain: Some((0.0, 1.0)),
            show_points: false,
        },
        data: PanelData::Scores {
            scores: profile.ranked_drivers(),
        },
    };

    Ok((
        Some(occasion_selector(snapshot, &profile.name)),
        vec![territories, drivers],
    ))
}

fn time_chart(
    id: &str,
    title: &str,
    kind: ChartKind,
    y_field: &str,
    y_title: &str,
    dimension: &str,
    format: ValueFormat,
) -> ChartSpec {
    ChartSpec {
        id: id.to_string(),
        title: title.to_string(),
        kind,
        x_field: "time".to_string(),
        x_title: "Mês".to_string(),
        y_field: y_field.to_string(),
        y_title: y_title.to_string(),
        color_field: Some("category".to_string()),
        color_title: Some(dimension.to_string()),
        format,
        value_domain: None,
        show_points: kind == ChartKind::Line,
    }
}

fn category_bar(id: &str, title: &str, x_title: &str, y_title: &str) -> ChartSpec {
    ChartSpec {
        id: id.to_string(),
        title: title.to_string(),
        kind: ChartKind::Bar,
        x_field: "category".to_string(),
        x_title: x_title.to_string(),
        y_field: "proportion".to_string(),
        y_title: y_title.to_string(),
        color_field: None,
        color_title: None,
        format: ValueFormat::Percent,
        value_domain: None,
        show_points: false,
    }
}

fn dimension_of(dataset: &Dataset) -> &str {
    match dataset {
        Dataset::Shares(table) => &table.dimension,
        Dataset::Series(table) => &table.dimension,
        Dataset::Breakdown(breakdown) => &breakdown.dimension,
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::infrastructure::config::tests::bundled_survey_config;
    use crate::infrastructure::memory_repository::InMemorySurveyRepository;

    pub fn service() -> DashboardService {
        let config = bundled_survey_config();
        let repository = Arc::new(InMemorySurveyRepository::generate(&config).unwrap());
        DashboardService::new(repository, config.dashboard.title)
    }

    fn panel_ids(view: &TabView) -> Vec<&str> {
        view.panels.iter().map(|p| p.chart.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_dashboard_lists_five_tabs() {
        let dashboard = service().get_dashboard().await.unwrap();

        assert_eq!(dashboard.title, "Dashboard – Varejo de Moda por Datas Comemorativas");
        assert_eq!(dashboard.time_buckets.len(), 12);
        let slugs: Vec<&str> = dashboard.tabs.iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(slugs, vec!["behavior", "consumption", "spend_intent", "competition", "occasions"]);

        let behavior = dashboard.tabs[0].selector.as_ref().unwrap();
        assert_eq!(behavior.selected, "channels");
        assert_eq!(behavior.options.len(), 3);

        let occasions = dashboard.tabs[4].selector.as_ref().unwrap();
        assert_eq!(occasions.selected, "Dia das Mães");
        assert!(dashboard.tabs[1].selector.is_none());
    }

    #[tokio::test]
    async fn test_behavior_tab_follows_view() {
        let service = service();

        let default = service.get_tab("behavior", None, None).await.unwrap();
        assert_eq!(panel_ids(&default), vec!["channels"]);
        assert_eq!(default.panels[0].chart.color_title.as_deref(), Some("Canal"));
        assert!(default.panels[0].chart.show_points);

        let media = service.get_tab("behavior", Some("media_habits"), None).await.unwrap();
        assert_eq!(panel_ids(&media), vec!["media_habits"]);
        assert_eq!(media.selector.unwrap().selected, "media_habits");
        match &media.panels[0].data {
            PanelData::Dataset(Dataset::Shares(table)) => assert_eq!(table.dimension, "Hábito de mídia"),
            other => panic!("unexpected panel data: {:?}", other),
        }

        let err = service.get_tab("behavior", Some("weather"), None).await.unwrap_err();
        assert!(matches!(err, DashboardError::UnknownView(v) if v == "weather"));
    }

    #[tokio::test]
    async fn test_consumption_and_spend_tabs() {
        let service = service();

        let consumption = service.get_tab("consumption", None, None).await.unwrap();
        assert_eq!(panel_ids(&consumption), vec!["purpose", "regional_ticket"]);
        assert_eq!(consumption.panels[0].chart.kind, ChartKind::StackedArea);
        assert_eq!(consumption.panels[1].chart.format, ValueFormat::Currency);

        let spend = service.get_tab("spend_intent", Some("ignored"), None).await.unwrap();
        assert_eq!(panel_ids(&spend), vec!["spend_intent", "non_essential_share"]);
        assert!(spend.panels.iter().all(|p| p.chart.kind == ChartKind::Bar));
        assert!(spend.selector.is_none());
    }

    #[tokio::test]
    async fn test_occasions_tab_follows_selection() {
        let service = service();

        let natal = service.get_tab("occasions", None, Some("Natal")).await.unwrap();
        assert_eq!(panel_ids(&natal), vec!["territories", "drivers"]);
        assert_eq!(natal.panels[0].chart.title, "Territórios de marca – Natal");
        assert_eq!(natal.panels[0].chart.value_domain, Some((0.0, 1.0)));

        match &natal.panels[1].data {
            PanelData::Scores { scores } => {
                assert_eq!(scores[0].label, "Campanhas inspiracionais");
                assert!(scores.windows(2).all(|w| w[0].score >= w[1].score));
            }
            other => panic!("unexpected panel data: {:?}", other),
        }

        let default = service.get_tab("occasions", None, None).await.unwrap();
        assert_eq!(default.selector.unwrap().selected, "Dia das Mães");

        let err = service.get_tab("occasions", None, Some("Carnaval")).await.unwrap_err();
        assert!(matches!(err, DashboardError::UnknownOccasion(_)));
    }

    #[tokio::test]
    async fn test_unknown_ids() {
        let service = service();

        assert!(matches!(
            service.get_tab("pricing", None, None).await,
            Err(DashboardError::UnknownTab(_))
        ));
        assert!(matches!(
            service.get_dataset("weather").await,
            Err(DashboardError::UnknownDataset(_))
        ));
    }

    #[tokio::test]
    async fn test_dataset_by_slug() {
        let service = service();

        match service.get_dataset("regional_ticket").await.unwrap() {
            Dataset::Series(table) => assert_eq!(table.rows.len(), 60),
            other => panic!("unexpected dataset: {:?}", other),
        }
        assert_eq!(
            service.list_occasions().await.unwrap(),
            vec!["Dia das Mães", "Natal", "Black Friday"]
        );
    }
}
