//! Static lookup tables behind the paper generator form.
//!
//! Exam type drives the stream list (for the exam types that need one),
//! exam type plus stream drives the subject list, and subject drives the
//! topic list. Unknown combinations fall back to defaults rather than
//! failing, so the form always has something to offer.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("unknown exam type: {0}")]
    UnknownExamType(String),

    #[error("{exam_type} requires a {kind}")]
    MissingStream {
        exam_type: String,
        kind: &'static str,
    },

    #[error("{stream} is not offered for {exam_type}")]
    UnknownStream { exam_type: String, stream: String },
}

pub const EXAM_TYPES: [&str; 15] = [
    "NEET",
    "JEE Main",
    "JEE Advanced",
    "UPSC",
    "MPSC",
    "NDA",
    "GATE",
    "SSC",
    "Railway",
    "Banking",
    "School Level",
    "Engineering",
    "Pharmacy",
    "CLAT",
    "CAT",
];

pub const LANGUAGES: [&str; 5] = ["English", "Hindi", "Marathi", "Tamil", "Telugu"];

pub const DEFAULT_LANGUAGE: &str = "English";

const SCHOOL_LEVELS: [&str; 12] = [
    "Class 1", "Class 2", "Class 3", "Class 4", "Class 5", "Class 6", "Class 7", "Class 8",
    "Class 9", "Class 10", "Class 11", "Class 12",
];

const ENGINEERING_STREAMS: [&str; 9] = [
    "Computer Science",
    "Mechanical",
    "Civil",
    "Electrical",
    "Electronics",
    "Chemical",
    "Aerospace",
    "Biotechnology",
    "Information Technology",
];

const PHARMACY_COURSES: [&str; 4] = ["D.Pharmacy", "B.Pharmacy", "M.Pharmacy", "Pharm.D"];

const DEFAULT_SUBJECTS: &[&str] = &["Mathematics", "Science", "English"];

const DEFAULT_TOPICS: &[&str] = &["General Topics"];

/// What the second dropdown of the generator is called for a given exam type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Class,
    Stream,
    Course,
}

impl StreamKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            StreamKind::Class => "Class",
            StreamKind::Stream => "Stream",
            StreamKind::Course => "Course",
        }
    }

    #[must_use]
    pub fn placeholder(self) -> &'static str {
        match self {
            StreamKind::Class => "Select class",
            StreamKind::Stream => "Select stream",
            StreamKind::Course => "Select course",
        }
    }
}

#[must_use]
pub fn is_exam_type(value: &str) -> bool {
    EXAM_TYPES.contains(&value)
}

/// Returns which kind of stream `exam_type` needs, if any.
#[must_use]
pub fn stream_kind(exam_type: &str) -> Option<StreamKind> {
    match exam_type {
        "School Level" => Some(StreamKind::Class),
        "Engineering" => Some(StreamKind::Stream),
        "Pharmacy" => Some(StreamKind::Course),
        _ => None,
    }
}

/// Streams offered for `exam_type`; empty when the exam type has none.
#[must_use]
pub fn streams(exam_type: &str) -> &'static [&'static str] {
    match stream_kind(exam_type) {
        Some(StreamKind::Class) => &SCHOOL_LEVELS,
        Some(StreamKind::Stream) => &ENGINEERING_STREAMS,
        Some(StreamKind::Course) => &PHARMACY_COURSES,
        None => &[],
    }
}

/// Subjects offered for an exam type and optional stream.
#[must_use]
pub fn subjects(exam_type: Option<&str>, stream: Option<&str>) -> &'static [&'static str] {
    let Some(exam_type) = exam_type else {
        return DEFAULT_SUBJECTS;
    };
    match (exam_type, stream) {
        ("School Level", Some(class)) => school_subjects(class),
        ("Engineering", Some(stream)) => engineering_subjects(stream),
        ("Pharmacy", Some(course)) => pharmacy_subjects(course),
        ("NEET", _) => &["Physics", "Chemistry", "Biology"],
        ("JEE Main" | "JEE Advanced", _) => &["Physics", "Chemistry", "Mathematics"],
        ("UPSC", _) => &[
            "History",
            "Geography",
            "Polity",
            "Economy",
            "Current Affairs",
            "Science & Technology",
        ],
        ("MPSC", _) => &[
            "History",
            "Geography",
            "Polity",
            "Economy",
            "Current Affairs",
            "Maharashtra GK",
        ],
        ("NDA", _) => &["Mathematics", "General Ability", "English", "General Science"],
        ("GATE", _) => &[
            "Engineering Mathematics",
            "Digital Logic",
            "Data Structures",
            "Algorithms",
            "Operating Systems",
        ],
        _ => DEFAULT_SUBJECTS,
    }
}

fn school_subjects(class: &str) -> &'static [&'static str] {
    match class {
        "Class 1" | "Class 2" | "Class 3" => &["English", "Mathematics", "EVS", "Hindi"],
        "Class 4" | "Class 5" => &["English", "Mathematics", "Science", "Social Studies", "Hindi"],
        "Class 6" | "Class 7" | "Class 8" => &[
            "English",
            "Mathematics",
            "Science",
            "Social Studies",
            "Hindi",
            "Sanskrit",
        ],
        "Class 9" | "Class 10" => &[
            "English",
            "Mathematics",
            "Science",
            "Social Studies",
            "Hindi",
            "Information Technology",
        ],
        "Class 11" | "Class 12" => &[
            "Physics",
            "Chemistry",
            "Mathematics",
            "Biology",
            "English",
            "Computer Science",
            "Economics",
            "Accountancy",
        ],
        _ => DEFAULT_SUBJECTS,
    }
}

fn engineering_subjects(stream: &str) -> &'static [&'static str] {
    match stream {
        "Computer Science" => &[
            "Data Structures",
            "Algorithms",
            "DBMS",
            "Operating Systems",
            "Computer Networks",
            "Software Engineering",
        ],
        "Mechanical" => &[
            "Thermodynamics",
            "Fluid Mechanics",
            "Machine Design",
            "Manufacturing",
            "Heat Transfer",
        ],
        "Civil" => &[
            "Structural Analysis",
            "Geotechnical Engineering",
            "Transportation",
            "Hydraulics",
            "Environmental Engineering",
        ],
        "Electrical" => &[
            "Circuit Theory",
            "Electromagnetic Theory",
            "Power Systems",
            "Control Systems",
            "Electrical Machines",
        ],
        "Electronics" => &[
            "Analog Circuits",
            "Digital Electronics",
            "Signals & Systems",
            "Communication Systems",
            "Microprocessors",
        ],
        "Chemical" => &[
            "Chemical Thermodynamics",
            "Process Control",
            "Mass Transfer",
            "Reaction Engineering",
            "Process Design",
        ],
        "Aerospace" => &[
            "Aerodynamics",
            "Flight Mechanics",
            "Propulsion",
            "Aircraft Structures",
            "Control Systems",
        ],
        "Biotechnology" => &[
            "Molecular Biology",
            "Biochemistry",
            "Genetic Engineering",
            "Bioprocess Engineering",
            "Immunology",
        ],
        "Information Technology" => &[
            "Data Structures",
            "Database Systems",
            "Web Technologies",
            "Cloud Computing",
            "Cybersecurity",
        ],
        _ => DEFAULT_SUBJECTS,
    }
}

fn pharmacy_subjects(course: &str) -> &'static [&'static str] {
    match course {
        "D.Pharmacy" => &[
            "Pharmaceutics",
            "Pharmaceutical Chemistry",
            "Pharmacology",
            "Human Anatomy",
            "Health Education",
        ],
        "B.Pharmacy" => &[
            "Pharmaceutical Chemistry",
            "Pharmacology",
            "Pharmaceutics",
            "Pharmacognosy",
            "Pharmaceutical Analysis",
        ],
        "M.Pharmacy" => &[
            "Advanced Pharmaceutics",
            "Clinical Pharmacy",
            "Pharmacokinetics",
            "Drug Regulatory Affairs",
            "Pharmaceutical Biotechnology",
        ],
        "Pharm.D" => &[
            "Pharmacy Practice",
            "Clinical Pharmacy",
            "Pharmacotherapeutics",
            "Clinical Toxicology",
            "Clinical Research",
        ],
        _ => DEFAULT_SUBJECTS,
    }
}

/// Suggested topics for a subject.
#[must_use]
pub fn topics(subject: &str) -> &'static [&'static str] {
    match subject {
        "Physics" => &[
            "Mechanics",
            "Thermodynamics",
            "Electromagnetism",
            "Optics",
            "Modern Physics",
            "Waves",
            "Rotational Motion",
        ],
        "Chemistry" => &[
            "Organic Chemistry",
            "Inorganic Chemistry",
            "Physical Chemistry",
            "Chemical Bonding",
            "Periodic Table",
        ],
        "Biology" => &[
            "Cell Biology",
            "Genetics",
            "Ecology",
            "Human Physiology",
            "Plant Physiology",
            "Evolution",
        ],
        "Mathematics" => &[
            "Algebra",
            "Calculus",
            "Trigonometry",
            "Geometry",
            "Statistics",
            "Probability",
            "Coordinate Geometry",
        ],
        "History" => &[
            "Ancient History",
            "Medieval History",
            "Modern History",
            "Indian Freedom Struggle",
            "World History",
        ],
        "Geography" => &[
            "Physical Geography",
            "Human Geography",
            "Indian Geography",
            "World Geography",
            "Map Skills",
        ],
        "Science" => &["Matter", "Energy", "Living Things", "Earth & Space", "Force & Motion"],
        "English" => &["Grammar", "Comprehension", "Writing Skills", "Literature", "Vocabulary"],
        "Data Structures" => &[
            "Arrays",
            "Linked Lists",
            "Stacks",
            "Queues",
            "Trees",
            "Graphs",
            "Hashing",
        ],
        "Algorithms" => &[
            "Sorting",
            "Searching",
            "Greedy",
            "Dynamic Programming",
            "Divide & Conquer",
        ],
        "DBMS" => &[
            "SQL",
            "Normalization",
            "Transactions",
            "Indexing",
            "Query Optimization",
        ],
        "Pharmacology" => &[
            "General Pharmacology",
            "Cardiovascular Drugs",
            "CNS Drugs",
            "Antibiotics",
            "Chemotherapy",
        ],
        "Pharmaceutics" => &[
            "Dosage Forms",
            "Drug Delivery",
            "Biopharmaceutics",
            "Formulation",
            "Quality Control",
        ],
        _ => DEFAULT_TOPICS,
    }
}

/// Checks that an exam type is known and that its stream, when required, is offered.
///
/// # Errors
///
/// Returns `CatalogError` describing the first problem found.
pub fn check_selection(exam_type: &str, stream: Option<&str>) -> Result<(), CatalogError> {
    if !is_exam_type(exam_type) {
        return Err(CatalogError::UnknownExamType(exam_type.to_string()));
    }
    let Some(kind) = stream_kind(exam_type) else {
        return Ok(());
    };
    let Some(stream) = stream.filter(|value| !value.trim().is_empty()) else {
        return Err(CatalogError::MissingStream {
            exam_type: exam_type.to_string(),
            kind: kind.label(),
        });
    };
    if !streams(exam_type).contains(&stream) {
        return Err(CatalogError::UnknownStream {
            exam_type: exam_type.to_string(),
            stream: stream.to_string(),
        });
    }
    Ok(())
}
