use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use exam_core::model::{
    AnswerKeyEntry, AnswerMap, AttemptResult, Paper, PaperId, Question, QuestionId, QuestionKind,
    UserProfile,
};
use services::{
    AdminService, ApiClient, ApiConfig, ApiError, Credentials, FileDownloader, FsDownloader,
    GeneratorService, PaperLibraryService, PaperService, ProfileService, ResultsService,
    SubscriptionService, TransactionsService,
};

use crate::context::{UiApp, build_app_context};
use crate::views::{
    AdminAction, AdminUserTable, AdminView, AttemptTable, GeneratorView, PlanGrid, PracticeView,
    ReviewPanel, ToastStack, TransactionList, use_toasts_provider,
};
use crate::vm::{AdminUserRowVm, AttemptRowVm, PlanCardVm, ReviewVm, TransactionRowVm};

#[derive(Default)]
pub struct FakePapers {
    pub fetch_error: Option<ApiError>,
}

#[async_trait]
impl PaperService for FakePapers {
    async fn fetch_paper(&self, paper_id: &PaperId) -> Result<Paper, ApiError> {
        if let Some(err) = &self.fetch_error {
            return Err(err.clone());
        }
        Paper::new(
            paper_id.clone(),
            "Chemistry Sprint",
            "JEE Main",
            "Chemistry",
            vec![
                Question::new(
                    QuestionId::new("q1"),
                    QuestionKind::TrueFalse,
                    "Noble gases are inert.",
                    Some(1),
                ),
                Question::new(
                    QuestionId::new("q2"),
                    QuestionKind::ShortAnswer,
                    "Name the lightest element.",
                    Some(2),
                ),
            ],
            3,
            10,
        )
        .map_err(|err| ApiError::InvalidResponse(err.to_string()))
    }

    async fn submit_answers(
        &self,
        _paper_id: &PaperId,
        _answers: &AnswerMap,
    ) -> Result<AttemptResult, ApiError> {
        Ok(AttemptResult {
            score: 1,
            total_questions: 2,
            percentage: 50.0,
            answer_key: vec![AnswerKeyEntry {
                question_id: QuestionId::new("q1"),
                correct_answer: "True".into(),
                explanation: None,
            }],
        })
    }
}

struct TestApp {
    papers: Arc<FakePapers>,
    user: Option<UserProfile>,
    api: ApiClient,
}

impl UiApp for TestApp {
    fn user(&self) -> Option<UserProfile> {
        self.user.clone()
    }

    fn papers(&self) -> Arc<dyn PaperService> {
        self.papers.clone()
    }

    fn library(&self) -> Arc<PaperLibraryService> {
        Arc::new(PaperLibraryService::new(self.api.clone(), credentials()))
    }

    fn generator(&self) -> Arc<GeneratorService> {
        Arc::new(GeneratorService::new(self.api.clone(), credentials()))
    }

    fn results(&self) -> Arc<ResultsService> {
        Arc::new(ResultsService::new(self.api.clone(), credentials()))
    }

    fn subscriptions(&self) -> Arc<SubscriptionService> {
        Arc::new(SubscriptionService::new(self.api.clone()))
    }

    fn transactions(&self) -> Arc<TransactionsService> {
        Arc::new(TransactionsService::new(self.api.clone(), credentials()))
    }

    fn profile(&self) -> Arc<ProfileService> {
        Arc::new(ProfileService::new(self.api.clone(), credentials()))
    }

    fn admin(&self) -> Arc<AdminService> {
        Arc::new(AdminService::new(self.api.clone(), credentials()))
    }

    fn downloader(&self) -> Arc<dyn FileDownloader> {
        Arc::new(FsDownloader::new(std::env::temp_dir()))
    }
}

fn credentials() -> Credentials {
    Credentials::bearer("test-token")
}

#[derive(Clone, PartialEq)]
pub enum ViewKind {
    Practice(&'static str),
    Generator,
    Review(ReviewVm),
    Attempts(Vec<AttemptRowVm>),
    Admin,
    Plans(Vec<PlanCardVm>),
    Transactions(Vec<TransactionRowVm>),
    AdminUsers(Vec<AdminUserRowVm>),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view.clone());
    use_toasts_provider();
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    let body = match view {
        ViewKind::Practice(paper_id) => rsx! { PracticeView { paper_id: paper_id.to_string() } },
        ViewKind::Generator => rsx! { GeneratorView {} },
        ViewKind::Review(review) => rsx! { ReviewPanel { review } },
        ViewKind::Attempts(rows) => rsx! { AttemptTable { rows } },
        ViewKind::Admin => rsx! { AdminView {} },
        ViewKind::Plans(cards) => rsx! { PlanGrid { cards } },
        ViewKind::Transactions(rows) => rsx! {
            TransactionList { rows, show_user: true, on_receipt: move |_| {} }
        },
        ViewKind::AdminUsers(rows) => rsx! {
            AdminUserTable { rows, on_action: move |_: AdminAction| {} }
        },
    };
    rsx! {
        {body}
        ToastStack {}
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        for _ in 0..3 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with(view, FakePapers::default())
}

pub fn setup_view_harness_with(view: ViewKind, papers: FakePapers) -> ViewHarness {
    setup_view_harness_for(view, papers, None)
}

pub fn setup_view_harness_for(
    view: ViewKind,
    papers: FakePapers,
    user: Option<UserProfile>,
) -> ViewHarness {
    // Never contacted by the views under test.
    let api = ApiClient::new(&ApiConfig::new("http://127.0.0.1:9")).expect("api client");
    let app = Arc::new(TestApp {
        papers: Arc::new(papers),
        user,
        api,
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness { dom }
}
