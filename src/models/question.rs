use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level assessment categories, in the fixed order the questionnaire
/// walks through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Environmental,
    Social,
    Governance,
}

impl Dimension {
    pub const ORDER: [Dimension; 3] = [
        Dimension::Environmental,
        Dimension::Social,
        Dimension::Governance,
    ];

    /// The dimension that follows this one in the questionnaire, if any.
    pub fn next(self) -> Option<Dimension> {
        match self {
            Dimension::Environmental => Some(Dimension::Social),
            Dimension::Social => Some(Dimension::Governance),
            Dimension::Governance => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Dimension::Environmental => "environmental",
            Dimension::Social => "social",
            Dimension::Governance => "governance",
        }
    }

    /// Short blurb shown when a dimension is introduced.
    pub fn focus(self) -> &'static str {
        match self {
            Dimension::Environmental => {
                "resource management, energy, waste, emissions and campus biodiversity"
            }
            Dimension::Social => {
                "equity, human rights, student support and university social responsibility"
            }
            Dimension::Governance => {
                "transparency, institutional ethics, strategic planning and governing bodies"
            }
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Environmental => write!(f, "Environmental"),
            Dimension::Social => write!(f, "Social"),
            Dimension::Governance => write!(f, "Governance"),
        }
    }
}

/// A validated questionnaire score. Construction is the only place the 1-5
/// range is checked; everything downstream indexes arrays with it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then(|| Score(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Zero-based index into per-score label/recommendation arrays.
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One questionnaire item. Option labels and recommendations are fixed-size
/// arrays indexed by `Score::index`, defined at build time.
#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub dimension: Dimension,
    pub prompt: &'static str,
    pub options: [&'static str; 5],
    pub recommendations: [String; 5],
}

impl Question {
    /// Option strings the way the assistant presents them: `"<score>. <label>"`.
    pub fn formatted_options(&self) -> Vec<String> {
        self.options
            .iter()
            .enumerate()
            .map(|(i, label)| format!("{}. {}", i + 1, label))
            .collect()
    }

    pub fn recommendation_for(&self, score: Score) -> &str {
        &self.recommendations[score.index()]
    }
}

/// The static question bank plus lookup helpers. Built once at startup and
/// shared behind an `Arc`.
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new() -> Self {
        Self {
            questions: build_question_bank(),
        }
    }

    pub fn all(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Questions of one dimension, in questionnaire order.
    pub fn by_dimension(&self, dimension: Dimension) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| q.dimension == dimension)
            .collect()
    }

    pub fn dimension_len(&self, dimension: Dimension) -> usize {
        self.questions
            .iter()
            .filter(|q| q.dimension == dimension)
            .count()
    }

    pub fn question_at(&self, dimension: Dimension, index: usize) -> Option<&Question> {
        self.by_dimension(dimension).get(index).copied()
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::new()
    }
}

/// Maturity-ladder recommendations for one topic, one entry per score.
fn rec(topic: &str) -> [String; 5] {
    [
        format!("Start basic actions on {}. Set a plan with 6-12 month goals.", topic),
        format!("Move from isolated initiatives to a formal {} program with indicators.", topic),
        format!("Scale up {} and track results periodically.", topic),
        format!("Consolidate {} institutionally and publish progress and impact.", topic),
        format!("Keep improving {} continuously and share best practices.", topic),
    ]
}

fn q(
    id: &'static str,
    dimension: Dimension,
    prompt: &'static str,
    options: [&'static str; 5],
    topic: &str,
) -> Question {
    Question {
        id,
        dimension,
        prompt,
        options,
        recommendations: rec(topic),
    }
}

fn build_question_bank() -> Vec<Question> {
    use Dimension::{Environmental, Governance, Social};

    vec![
        // Environmental (11)
        q("env_renewables", Environmental, "Use of renewable energy",
            ["No renewable energy is used",
             "Isolated projects or pilots",
             "Partial use in some buildings",
             "Significant coverage (>30%) of consumption",
             "High coverage (>70%) with self-sufficiency goals and public measurement"],
            "renewable energy"),
        q("env_energy_consumption", Environmental, "Energy consumption management",
            ["No measurement or tracking",
             "One-off measurement without an action plan",
             "Regular measurement and occasional actions",
             "Comprehensive plan with goals and indicators",
             "Sustained reduction with a public annual report"],
            "energy consumption management"),
        q("env_efficiency_plans", Environmental, "Energy efficiency and emission reduction plans",
            ["No plan exists",
             "Draft plan without implementation",
             "Partial implementation in key areas",
             "Comprehensive plan with goals, indicators and annual review",
             "Sustained compliance, continuous improvement and external certifications"],
            "energy efficiency and emission reduction"),
        q("env_water", Environmental, "Efficient water management",
            ["No actions or measurement",
             "Sporadic measurement without actions",
             "Occasional actions (saving devices, leak control)",
             "Comprehensive management and reuse plan",
             "Sustained reduction, rainwater harvesting and recirculation"],
            "efficient water management"),
        q("env_circular_economy", Environmental, "Circular economy",
            ["Linear model prevails",
             "Isolated recycling or reuse initiatives",
             "Established programs in specific areas",
             "Institutional policy with goals and tracking",
             "Comprehensive implementation with measurable results and strategic alliances"],
            "circular economy"),
        q("env_waste", Environmental, "Solid and hazardous waste management",
            ["No differentiated handling",
             "Basic separation without tracking",
             "Separation program with training",
             "Comprehensive management with indicators and safe disposal",
             "Full traceability, source minimization and waste valorization"],
            "comprehensive waste management"),
        q("env_biodiversity", Environmental, "Biodiversity conservation",
            ["No inventory or actions",
             "Partial identification of green areas and species",
             "Occasional conservation programs",
             "Comprehensive plan with periodic monitoring",
             "Active conservation, restoration and links to research"],
            "campus biodiversity conservation"),
        q("env_culture", Environmental, "Environmental awareness and culture",
            ["No awareness activities",
             "Isolated activities on commemorative dates",
             "Annual environmental education programs",
             "Environmental culture embedded in campus life",
             "Consolidated and recognized institutional culture"],
            "environmental culture and education"),
        q("env_curriculum", Environmental, "Environmental education in the curriculum",
            ["No environmental content is included",
             "Elective or isolated content",
             "Partial integration in some faculties",
             "Cross-cutting inclusion in academic programs",
             "Comprehensive curriculum with active methodologies and real projects"],
            "curricular integration of sustainability"),
        q("env_mobility", Environmental, "Sustainable mobility",
            ["No policies or incentives",
             "Isolated initiatives (bike racks, shuttles)",
             "Partial sustainable mobility plan",
             "Comprehensive plan with infrastructure and monitoring",
             "High uptake of sustainable transport with impact measurement"],
            "sustainable campus mobility"),
        q("env_flexibility", Environmental, "Work and academic flexibility",
            ["No flexibility policies",
             "Occasional application in specific cases",
             "Partial policies in some areas",
             "Institutional policy with tracking",
             "High adoption, fewer commutes and documented benefits"],
            "work/academic flexibility to reduce footprint"),

        // Social (14)
        q("soc_pay_transparency", Social, "Transparent hiring and remuneration policies",
            ["No written policies or transparency mechanisms",
             "Basic guidelines without verification",
             "Formal policies with partial implementation",
             "Policies applied with tracking and public results",
             "Clear policies, externally audited, with published results"],
            "transparent hiring and remuneration policies"),
        q("soc_abuse_prevention", Social, "Structures that prevent and correct abuses of power",
            ["No structures to prevent or correct abuses",
             "Isolated protocols without consistent application",
             "Formal structures with partial implementation",
             "Consolidated structures with follow-up protocols",
             "Independent system with periodic results and external participation"],
            "prevention and handling of abuses of power"),
        q("soc_staff_evaluation", Social, "Evaluation policies for teaching and administrative work",
            ["No evaluation policies or practices",
             "Occasional evaluations without clear criteria",
             "Formal evaluations with limitations",
             "Periodic institutional evaluations with feedback",
             "Comprehensive system with tracking, transparency and continuous improvement"],
            "teaching and administrative evaluation"),
        q("soc_climate_surveys", Social, "Satisfaction and workplace climate surveys",
            ["No surveys are conducted",
             "Sporadic surveys without analysis of results",
             "Regular surveys with partial implementation",
             "Institutional surveys with result tracking",
             "Consolidated surveys with continuous improvement and external evaluation"],
            "workplace climate and satisfaction management"),
        q("soc_human_rights", Social, "Human rights policies",
            ["No explicit policies",
             "General statements without enforcement mechanisms",
             "Active policies applied partially",
             "Policies applied with tracking",
             "Comprehensive, audited policies with sanctions"],
            "human rights policies"),
        q("soc_student_support", Social, "Support programs for low-income students",
            ["No support programs",
             "Occasional support without broad coverage",
             "Basic programs with limited coverage",
             "Institutionalized programs with tracking",
             "Comprehensive programs with broad coverage and external alliances"],
            "comprehensive support for low-income students"),
        q("soc_internships", Social, "Professional internship and job placement programs",
            ["No internship or placement programs",
             "Occasional internships without tracking",
             "Limited programs in some areas",
             "Institutional programs with tracking",
             "Consolidated programs with broad coverage and impact evaluation"],
            "internships and job placement"),
        q("soc_usr_programs", Social, "Cooperation and university social responsibility programs",
            ["No USR policies",
             "Isolated projects without impact measurement",
             "Established programs in limited areas",
             "Institutionalized USR with tracking",
             "Consolidated USR with measurable results and external recognition"],
            "university social responsibility"),
        q("soc_research_partnerships", Social, "Research policies and agreements with social actors",
            ["No agreements with social actors",
             "Limited and sporadic agreements",
             "Regular agreements in some areas",
             "Broad agreements with verifiable impact",
             "Consolidated agreements with measured, recognized social impact"],
            "impactful research and social engagement"),
        q("soc_knowledge_transfer", Social, "Knowledge transfer and social impact measurement",
            ["No transfer mechanisms",
             "Occasional transfer without impact indicators",
             "Established processes in limited areas",
             "Institutionalized processes with indicators and tracking",
             "Consolidated transfer with externally validated impact measurement"],
            "knowledge transfer with social impact"),
        q("soc_usr_internal", Social, "Internal promotion and evaluation of USR",
            ["No internal policies",
             "Preliminary policies without implementation",
             "Policies applied partially",
             "Policies applied institution-wide with tracking",
             "Consolidated, audited policies with published results"],
            "internal USR governance"),
        q("soc_health", Social, "Nutrition, physical and mental health programs",
            ["No programs exist",
             "One-off activities without continuity",
             "Programs applied partially",
             "Institutionalized programs with broad coverage",
             "Comprehensive programs with external evaluation and published results"],
            "university health and wellbeing"),
        q("soc_gender_diversity", Social, "Gender and diversity in academic programs",
            ["No policies or programs",
             "One-off actions without continuity",
             "Partial inclusion in some programs",
             "Cross-cutting inclusion with tracking",
             "Comprehensive inclusion with indicators and external evaluation"],
            "gender equity and diversity"),
        q("soc_knowledge_impact", Social, "Evaluation of the social impact of knowledge",
            ["Social impact of knowledge is not evaluated",
             "One-off evaluations without a clear methodology",
             "Partial evaluation in some areas",
             "Institutional evaluation with indicators",
             "Comprehensive evaluation with external validation and public results"],
            "measuring the social impact of knowledge"),

        // Governance (18)
        q("gov_plan", Governance, "Sustainability plan or strategy",
            ["No plan exists",
             "Draft without formal approval",
             "Approved plan with limited implementation",
             "Approved plan in execution with indicators",
             "Comprehensive plan, periodically reviewed, aligned with international standards"],
            "strategic sustainability plan"),
        q("gov_academic_committee", Governance, "Formalized academic committee",
            ["No committee exists",
             "Informally constituted committee",
             "Formalized committee with infrequent meetings",
             "Active committee with clear duties and meeting minutes",
             "Consolidated committee with cross-cutting participation and periodic evaluation"],
            "academic sustainability committee"),
        q("gov_transparency", Governance, "Organizational transparency",
            ["No management information is published",
             "Partial and sporadic publication",
             "Regular but incomplete publication",
             "Complete and up-to-date publication",
             "Full transparency with external audits and open access"],
            "transparency and accountability"),
        q("gov_research_committee", Governance, "Research committee with external participation",
            ["No committee exists",
             "Internal committee without external participation",
             "Committee with limited external participation",
             "Committee with regular, active external participation",
             "Consolidated committee with broad external participation and periodic evaluation"],
            "research committee with external participation"),
        q("gov_mission", Governance, "Sustainability in the vision/mission",
            ["Sustainability is not mentioned",
             "Generic mention without associated strategies",
             "Formal inclusion with isolated actions",
             "Explicit inclusion with coherent policies and programs",
             "Explicit inclusion with indicators and compliance tracking"],
            "aligning mission and vision with sustainability"),
        q("gov_admin_committee", Governance, "Administrative and financial committee",
            ["No committee exists",
             "Informal committee without clear duties",
             "Formalized committee with infrequent meetings",
             "Active committee tracking decisions and results",
             "Consolidated committee with audits and periodic performance evaluation"],
            "administrative and financial committee"),
        q("gov_ethics_code", Governance, "Institutional code of ethics",
            ["No code exists",
             "Draft or undisclosed code",
             "Formal code with limited application",
             "Current code, disseminated and applied",
             "Comprehensive code with tracking and sanction mechanisms"],
            "institutional code of ethics"),
        q("gov_transparency_portal", Governance, "Transparency portal",
            ["No portal exists",
             "Basic portal with limited information",
             "Portal with broad information but irregular updates",
             "Portal updated periodically and easy to navigate",
             "Comprehensive, up-to-date portal with performance indicators"],
            "transparency portal"),
        q("gov_strategic_plan", Governance, "Strategic plan aligned with sustainability and USR",
            ["Plan without mention of sustainability or USR",
             "Generic mention without measurable objectives",
             "Partial inclusion of sustainable objectives",
             "Explicit inclusion with indicators and tracking",
             "Comprehensive inclusion with measurable, publicly reported results"],
            "aligning the strategic plan with sustainability and USR"),
        q("gov_conflict_interest", Governance, "Conflict of interest prevention",
            ["No policies or mechanisms",
             "Basic policies without verification mechanisms",
             "Policies applied partially, without clear sanctions",
             "Policies applied with tracking and sanctions",
             "Comprehensive system with constant monitoring and public transparency"],
            "conflict of interest prevention"),
        q("gov_esg_officer", Governance, "ESG/USR office or officer",
            ["No designated officer",
             "Informal officer or scattered duties",
             "Formal officer with limited duties",
             "Office or officer with resources and clear duties",
             "Consolidated office with budget, staff and authority"],
            "ESG/USR governance structure"),
        q("gov_good_governance", Governance, "Good governance code",
            ["No code exists",
             "Preliminary code without formal approval",
             "Approved code without full implementation",
             "Current, applied code",
             "Robust code applied with audits and periodic review"],
            "good governance code"),
        q("gov_sustainability_policies", Governance, "Formalized sustainability policies",
            ["No policies exist",
             "Draft policies or without formal approval",
             "Approved policies with partial application",
             "Policies applied institution-wide",
             "Consolidated, evaluated policies aligned with international standards"],
            "institutional sustainability policies"),
        q("gov_audit_committee", Governance, "Internal audit committee",
            ["No committee exists",
             "Preliminary committee without clear duties",
             "Active committee with limited duties",
             "Active committee with periodic reviews and recommendations",
             "Consolidated, independent committee with exhaustive follow-up"],
            "internal audit committee"),
        q("gov_esg_risks", Governance, "ESG risk assessment",
            ["No assessment is performed",
             "Partial assessment without a defined methodology",
             "Assessment with a basic methodology in some areas",
             "Systematic assessment with mitigation plans",
             "Comprehensive assessment, externally validated, with public follow-up"],
            "ESG risk management"),
        q("gov_board_gender", Governance, "Gender equity in governing bodies",
            ["No equity policies or data",
             "Basic diagnosis without actions",
             "Policies applied partially",
             "Active policies with tracking and targets",
             "Equity achieved or close, with monitoring and accountability"],
            "gender equity in governing bodies"),
        q("gov_stakeholders", Governance, "Stakeholder participation",
            ["Stakeholders are not involved",
             "Sporadic, unstructured participation",
             "Regular but limited participation",
             "Active participation with consultation mechanisms",
             "Broad, institutionalized participation with binding feedback"],
            "stakeholder participation"),
        q("gov_open_data_portal", Governance, "Institutional transparency portal",
            ["Does not exist",
             "Basic portal with general information",
             "Portal with varied but outdated information",
             "Up-to-date portal with easy access",
             "Comprehensive, up-to-date, interactive portal with open data"],
            "institutional transparency portal (open data)"),
    ]
}
