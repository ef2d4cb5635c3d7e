//! Built-in practice content so the app is useful without external config or OpenAI.

use crate::domain::{Difficulty, Exercise, ExerciseCategory, PracticePhrase, TargetSound, Topic, WordOfDay};

fn topic(icon: &str, name: &str, scenes: [&str; 3], learner: &str, tutor: &str) -> Topic {
  Topic {
    name: name.into(),
    icon: icon.into(),
    scenes: scenes.iter().map(|s| s.to_string()).collect(),
    learner_role: learner.into(),
    tutor_role: tutor.into(),
  }
}

pub fn seed_topics() -> Vec<Topic> {
  vec![
    topic("🍽️", "Restaurant", ["Ordering food", "Making reservations", "Complaining"], "Customer", "Waiter"),
    topic("✈️", "Travel", ["Airport check-in", "Hotel booking", "Asking directions"], "Tourist", "Travel Agent"),
    topic("💼", "Business", ["Job interview", "Business meeting", "Email writing"], "Job Applicant", "Interviewer"),
    topic("🛒", "Shopping", ["Clothes shopping", "Electronics", "Returns & exchanges"], "Customer", "Sales Assistant"),
    topic("🏥", "Healthcare", ["Doctor's visit", "Pharmacy", "Symptoms description"], "Patient", "Doctor"),
    topic("🎬", "Entertainment", ["Movies & TV", "Music", "Books & reading"], "Movie Buff", "Friend"),
  ]
}

/// Used when a request names a topic we do not know.
pub fn default_topic() -> Topic {
  topic("🎓", "General", ["Small talk", "Daily routine", "Hobbies"], "Student", "Tutor")
}

pub fn seed_phrases() -> Vec<PracticePhrase> {
  let table: [(Difficulty, &[&str]); 3] = [
    (Difficulty::Beginner, &[
      "Hello, how are you today?",
      "I would like a cup of coffee.",
      "Where is the nearest station?",
      "Thank you very much for your help.",
      "Could you repeat that, please?",
    ]),
    (Difficulty::Intermediate, &[
      "The quick brown fox jumps over the lazy dog.",
      "She sells seashells by the seashore.",
      "Peter Piper picked a peck of pickled peppers.",
      "How much wood would a woodchuck chuck?",
      "Unique New York, New York's unique.",
    ]),
    (Difficulty::Advanced, &[
      "The sixth sick sheik's sixth sheep's sick.",
      "Betty Botter bought some butter.",
      "Fuzzy Wuzzy was a bear. Fuzzy Wuzzy had no hair.",
      "I slit the sheet, the sheet I slit, and on the slitted sheet I sit.",
      "Six thick thistle sticks.",
    ]),
  ];
  table
    .iter()
    .flat_map(|(d, texts)| texts.iter().map(move |t| PracticePhrase { difficulty: *d, text: t.to_string() }))
    .collect()
}

pub fn seed_sounds() -> Vec<TargetSound> {
  [
    ("θ", "th (think)", "Voiceless dental fricative"),
    ("ð", "th (this)", "Voiced dental fricative"),
    ("r", "r (red)", "Alveolar approximant"),
    ("l", "l (light)", "Alveolar lateral approximant"),
    ("ʃ", "sh (she)", "Voiceless postalveolar fricative"),
    ("ʒ", "s (measure)", "Voiced postalveolar fricative"),
  ]
  .iter()
  .map(|(symbol, example, description)| TargetSound {
    symbol: symbol.to_string(),
    example: example.to_string(),
    description: description.to_string(),
  })
  .collect()
}

/// Canned conversation replies served when no response generator answers.
pub fn seed_fallback_replies() -> Vec<String> {
  [
    "That's interesting! Could you tell me more about that?",
    "Good point! How do you feel about that?",
    "I understand. What happened next?",
    "That's a great question! What do you think about it?",
    "Interesting perspective! Could you elaborate?",
  ]
  .iter()
  .map(|s| s.to_string())
  .collect()
}

fn fill(id: &str, category: ExerciseCategory, prompt: &str, answer: &str, explanation: &str) -> Exercise {
  Exercise {
    id: id.into(),
    category,
    prompt: prompt.into(),
    options: Vec::new(),
    answer: answer.into(),
    explanation: explanation.into(),
  }
}

fn choice(id: &str, category: ExerciseCategory, prompt: &str, options: &[&str], correct: usize, explanation: &str) -> Exercise {
  Exercise {
    id: id.into(),
    category,
    prompt: prompt.into(),
    options: options.iter().map(|o| o.to_string()).collect(),
    answer: options[correct].to_string(),
    explanation: explanation.into(),
  }
}

/// Grammar drills (tenses, articles, prepositions) and vocabulary games.
pub fn seed_exercises() -> Vec<Exercise> {
  use ExerciseCategory::*;
  let at_on_in = ["at", "on", "in"];
  let in_on_at = ["in", "on", "at"];
  vec![
    fill("tenses-1", Tenses, "I usually ______ (go) to bed at 11 PM.", "go", "Present simple for habits"),
    fill("tenses-2", Tenses, "Right now, she ______ (study) for her exam.", "is studying", "Present continuous for actions happening now"),
    fill("tenses-3", Tenses, "Yesterday, they ______ (visit) the museum.", "visited", "Past simple for completed actions"),
    fill("tenses-4", Tenses, "By next year, I ______ (learn) English for 5 years.", "will have been learning", "Future perfect continuous for duration"),
    fill("tenses-5", Tenses, "When I arrived, they ______ already ______ (finish) dinner.", "had finished", "Past perfect for actions before another past action"),
    choice("tenses-6", Tenses, "Which sentence is in present perfect?",
      &["I eat breakfast every day.", "I have eaten breakfast.", "I am eating breakfast.", "I will eat breakfast."], 1,
      "Present perfect is have/has + past participle"),
    choice("tenses-7", Tenses, "Choose the past continuous sentence:",
      &["She sings beautifully.", "She was singing when I called.", "She has sung that song before.", "She will sing tomorrow."], 1,
      "Past continuous is was/were + -ing"),

    fill("articles-1", Articles, "I saw ______ interesting movie last night.", "an", "Use 'an' before a vowel sound"),
    fill("articles-2", Articles, "She is ______ best student in our class.", "the", "Use 'the' with superlatives"),
    fill("articles-3", Articles, "He wants to buy ______ new car.", "a", "Use 'a' with a singular countable noun mentioned for the first time"),
    fill("articles-4", Articles, "______ Mount Everest is in Nepal.", "", "Single mountains take no article"),
    fill("articles-5", Articles, "I need ______ information about this topic.", "", "Uncountable nouns take no indefinite article"),
    fill("articles-6", Articles, "She plays ______ piano beautifully.", "the", "Use 'the' with musical instruments"),
    fill("articles-7", Articles, "They went to ______ United States last year.", "the", "Use 'the' with plural country names"),
    fill("articles-8", Articles, "I'll be back in ______ hour.", "an", "'Hour' starts with a vowel sound"),
    choice("articles-9", Articles, "The sun rises in the east. Which rule applies?",
      &["Use 'the' with unique things (sun, moon, earth)", "Use 'the' with cardinal directions", "Both of the above"], 2,
      "Both the sun and the east take 'the'"),
    choice("articles-10", Articles, "I need a pen and some paper. Which rule applies?",
      &["Use 'a' with countable nouns", "Use no article with uncountable nouns", "Both of the above"], 2,
      "'Pen' is countable, 'paper' is uncountable here"),

    choice("prepositions-1", Prepositions, "I have a meeting ______ 3 PM.", &at_on_in, 0, "'At' for clock times"),
    choice("prepositions-2", Prepositions, "Her birthday is ______ June.", &at_on_in, 2, "'In' for months"),
    choice("prepositions-3", Prepositions, "We'll meet ______ Monday.", &at_on_in, 1, "'On' for days"),
    choice("prepositions-4", Prepositions, "I was born ______ 1990.", &at_on_in, 2, "'In' for years"),
    choice("prepositions-5", Prepositions, "The shop closes ______ midnight.", &at_on_in, 0, "'At' for points in time"),
    choice("prepositions-6", Prepositions, "The book is ______ the table.", &in_on_at, 1, "'On' for surfaces"),
    choice("prepositions-7", Prepositions, "She lives ______ New York.", &in_on_at, 0, "'In' for cities"),
    choice("prepositions-8", Prepositions, "Wait for me ______ the bus stop.", &in_on_at, 2, "'At' for specific points"),
    choice("prepositions-9", Prepositions, "There's a picture ______ the wall.", &in_on_at, 1, "'On' for surfaces"),
    choice("prepositions-10", Prepositions, "He's sitting ______ the front of the car.", &in_on_at, 0, "'In the front of' a vehicle"),
    choice("prepositions-11", Prepositions, "I'm good ______ math.", &["at", "in", "for"], 0, "good at"),
    choice("prepositions-12", Prepositions, "She's interested ______ learning English.", &["in", "at", "with"], 0, "interested in"),
    choice("prepositions-13", Prepositions, "He apologized ______ being late.", &["for", "about", "to"], 0, "apologize for"),
    choice("prepositions-14", Prepositions, "They're talking ______ the weather.", &["about", "on", "with"], 0, "talk about"),
    choice("prepositions-15", Prepositions, "I'm looking forward ______ seeing you.", &["to", "for", "at"], 0, "look forward to"),

    choice("vocabulary-1", Vocabulary, "The new policy will have a ______ impact on the environment.", &["significant", "ambiguous"], 0, "significant: important or noticeable"),
    choice("vocabulary-2", Vocabulary, "Her ______ attention to detail made her an excellent editor.", &["meticulous", "ephemeral"], 0, "meticulous: showing great attention to detail"),
    choice("vocabulary-3", Vocabulary, "Smartphones have become ______ in modern society.", &["ubiquitous", "benevolent"], 0, "ubiquitous: present, appearing, or found everywhere"),
    choice("vocabulary-4", Vocabulary, "The beauty of cherry blossoms is ______, lasting only a week.", &["ephemeral", "ambiguous"], 0, "ephemeral: lasting for a very short time"),
    choice("vocabulary-5", Vocabulary, "His ______ nature made him popular among his colleagues.", &["benevolent", "meticulous"], 0, "benevolent: well meaning and kindly"),
    choice("vocabulary-6", Vocabulary, "What does 'ephemeral' mean?",
      &["Lasting forever", "Lasting a very short time", "Extremely large", "Very colorful"], 1, "ephemeral: lasting for a very short time"),
    choice("vocabulary-7", Vocabulary, "Which word means 'showing great attention to detail'?",
      &["Benevolent", "Meticulous", "Ubiquitous", "Ambiguous"], 1, "meticulous: showing great attention to detail"),
    choice("vocabulary-8", Vocabulary, "What is the opposite of 'ubiquitous'?", &["Common", "Rare", "Everywhere", "Popular"], 1, "ubiquitous means found everywhere"),
    choice("vocabulary-9", Vocabulary, "Which word describes something with more than one meaning?",
      &["Clear", "Specific", "Ambiguous", "Obvious"], 2, "ambiguous: having more than one possible meaning"),
  ]
}

fn strings(items: &[&str]) -> Vec<String> {
  items.iter().map(|s| s.to_string()).collect()
}

/// Rotation for the word-of-the-day card.
pub fn seed_words_of_day() -> Vec<WordOfDay> {
  let word = |word: &str, phonetic: &str, pos: &str, meaning: &str, example: &str, synonyms: &[&str], antonyms: &[&str], origin: &str| WordOfDay {
    word: word.into(),
    phonetic: phonetic.into(),
    part_of_speech: pos.into(),
    meaning: meaning.into(),
    example: example.into(),
    synonyms: strings(synonyms),
    antonyms: strings(antonyms),
    origin: origin.into(),
    difficulty: Difficulty::Intermediate,
    category: "Formal".into(),
  };
  vec![
    word("Ubiquitous", "/juːˈbɪk.wɪ.təs/", "adjective", "Present, appearing, or found everywhere",
      "Mobile phones have become ubiquitous in modern society.",
      &["omnipresent", "pervasive", "universal", "everywhere"], &["rare", "scarce", "uncommon"],
      "Mid 19th century: from Latin ubique 'everywhere' + -ous."),
    word("Ephemeral", "/ɪˈfem.ər.əl/", "adjective", "Lasting for a very short time",
      "The beauty of cherry blossoms is ephemeral.",
      &["fleeting", "transient", "brief"], &["permanent", "lasting", "enduring"],
      "Late 16th century: from Greek ephēmeros 'lasting only a day'."),
    word("Meticulous", "/məˈtɪk.jə.ləs/", "adjective", "Showing great attention to detail",
      "Her meticulous notes made the report easy to write.",
      &["careful", "thorough", "precise"], &["careless", "sloppy"],
      "Mid 16th century: from Latin meticulosus 'fearful'."),
    word("Benevolent", "/bəˈnev.əl.ənt/", "adjective", "Well meaning and kindly",
      "A benevolent neighbour helped us move in.",
      &["kind", "generous", "charitable"], &["malevolent", "unkind"],
      "Late Middle English: from Latin bene volent- 'well wishing'."),
    word("Ambiguous", "/æmˈbɪɡ.ju.əs/", "adjective", "Having more than one possible meaning",
      "The ending of the film was deliberately ambiguous.",
      &["unclear", "vague", "equivocal"], &["clear", "definite", "explicit"],
      "Early 16th century: from Latin ambiguus 'doubtful'."),
  ]
}
