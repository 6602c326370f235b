// Correction suggestions: a best-first edit search over the dictionary graph
//
// The search walks the transducer from its start state while consuming the
// misspelled word. Every queued node is a partial dictionary path paired
// with a position in the typed word; edits move one or both forward at the
// price given by `costs`. Nodes leave the queue cheapest first, so complete
// candidates appear in ascending cost order and the search can stop as soon
// as enough of them are known.

pub mod costs;

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use hashbrown::{HashMap, HashSet};
use kielo_core::case::{apply_case, detect_case, to_lower, CaseType};
use kielo_core::character::{simple_lower, simple_upper};
use kielo_fst::flags::FlagState;
use kielo_fst::{StateId, Symbol, TransducerStore};

use crate::options::Options;
use crate::MAX_WORD_CHARS;
use costs::CostModel;

/// Node expansions allowed per search.
pub const MAX_STEPS: usize = 200_000;

/// A correction candidate and the edit cost that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub word: String,
    pub cost: u32,
}

impl Suggestion {
    fn rank(&self) -> (u32, usize, &str) {
        (self.cost, self.word.chars().count(), &self.word)
    }
}

/// Candidate prefixes are stored as a trie of `(parent, char)` links so a
/// queued node carries one index instead of its own string.
struct Prefixes {
    links: Vec<(u32, char)>,
    index: HashMap<(u32, char), u32>,
}

const ROOT: u32 = 0;

impl Prefixes {
    fn new() -> Self {
        Self {
            links: vec![(ROOT, '\0')],
            index: HashMap::new(),
        }
    }

    fn push(&mut self, parent: u32, c: char) -> u32 {
        if let Some(&id) = self.index.get(&(parent, c)) {
            return id;
        }
        let id = self.links.len() as u32;
        self.links.push((parent, c));
        self.index.insert((parent, c), id);
        id
    }

    fn last(&self, id: u32) -> Option<char> {
        (id != ROOT).then(|| self.links[id as usize].1)
    }

    fn chars(&self, mut id: u32) -> Vec<char> {
        let mut out = Vec::new();
        while id != ROOT {
            let (parent, c) = self.links[id as usize];
            out.push(c);
            id = parent;
        }
        out.reverse();
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Node {
    state: StateId,
    pos: usize,
    /// Second half of a transposition, which the next letter must supply.
    pending: Option<char>,
    flags: FlagState,
    prefix: u32,
}

struct Queued {
    cost: u32,
    seq: u64,
    node: Node,
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        (self.cost, self.seq) == (other.cost, other.seq)
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.cost, self.seq).cmp(&(other.cost, other.seq))
    }
}

/// Edit search over one transducer.
pub struct Suggester<'a> {
    store: &'a TransducerStore,
    costs: CostModel,
    max_cost: u32,
    max_steps: usize,
}

impl<'a> Suggester<'a> {
    pub fn new(store: &'a TransducerStore, options: &Options) -> Self {
        Self {
            store,
            costs: CostModel {
                ocr: options.ocr_suggestions,
            },
            max_cost: costs::MAX_COST,
            max_steps: MAX_STEPS,
        }
    }

    pub fn with_max_cost(mut self, max_cost: u32) -> Self {
        self.max_cost = max_cost;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Dictionary words within `max_cost` edits of the lowercase `word`,
    /// cheapest first. Each reachable word is offered to `accept`, which
    /// returns the form to keep (re-cased, verified) or `None`. The search
    /// stops once `want` words are kept and every cheaper path is spent.
    pub fn search(
        &self,
        word: &[char],
        want: usize,
        accept: &mut dyn FnMut(&[char]) -> Option<String>,
    ) -> Vec<Suggestion> {
        let n = word.len();
        let mut found: Vec<Suggestion> = Vec::new();
        if want == 0 {
            return found;
        }

        let mut prefixes = Prefixes::new();
        let mut tried: HashSet<u32> = HashSet::new();
        let mut visited: HashSet<Node> = HashSet::new();
        let mut heap: BinaryHeap<Reverse<Queued>> = BinaryHeap::new();
        let mut seq = 0u64;
        let mut steps = 0usize;

        let mut enqueue = |heap: &mut BinaryHeap<Reverse<Queued>>, cost: u32, node: Node| {
            if cost <= self.max_cost {
                seq += 1;
                heap.push(Reverse(Queued { cost, seq, node }));
            }
        };

        enqueue(
            &mut heap,
            0,
            Node {
                state: self.store.start(),
                pos: 0,
                pending: None,
                flags: FlagState::new(self.store.symbols().feature_count()),
                prefix: ROOT,
            },
        );

        while let Some(Reverse(Queued { cost, node, .. })) = heap.pop() {
            if found.len() >= want && found.last().is_some_and(|last| cost > last.cost) {
                break;
            }
            if !visited.insert(node.clone()) {
                continue;
            }
            steps += 1;
            if steps > self.max_steps {
                log::warn!(
                    "suggestion search for {:?} stopped after {} steps",
                    word.iter().collect::<String>(),
                    self.max_steps
                );
                break;
            }

            if node.pos == n
                && node.pending.is_none()
                && self.store.is_final(node.state)
                && tried.insert(node.prefix)
            {
                if let Some(accepted) = accept(&prefixes.chars(node.prefix)) {
                    if !found.iter().any(|s| s.word == accepted) {
                        found.push(Suggestion { word: accepted, cost });
                    }
                }
            }

            let previous = prefixes.last(node.prefix);
            for t in self.store.transitions_from(node.state) {
                match t.input {
                    Symbol::Epsilon => enqueue(
                        &mut heap,
                        cost,
                        Node {
                            state: t.target,
                            ..node.clone()
                        },
                    ),
                    Symbol::Flag(flag) => {
                        let mut flags = node.flags.clone();
                        if flags.apply(&flag).is_some() {
                            enqueue(
                                &mut heap,
                                cost,
                                Node {
                                    state: t.target,
                                    flags,
                                    ..node.clone()
                                },
                            );
                        }
                    }
                    Symbol::Tag(_) => {}
                    Symbol::Char(c) => {
                        let c = simple_lower(c);
                        let step = |pos: usize, pending: Option<char>, prefix: u32| Node {
                            state: t.target,
                            pos,
                            pending,
                            flags: node.flags.clone(),
                            prefix,
                        };
                        if let Some(p) = node.pending {
                            if c == p {
                                let prefix = prefixes.push(node.prefix, c);
                                enqueue(&mut heap, cost, step(node.pos, None, prefix));
                            }
                            continue;
                        }

                        let prefix = prefixes.push(node.prefix, c);
                        if node.pos < n {
                            let typed = word[node.pos];
                            let sub = self.costs.substitution(typed, c);
                            enqueue(&mut heap, cost + sub, step(node.pos + 1, None, prefix));

                            if node.pos + 1 < n && c == word[node.pos + 1] && typed != c {
                                enqueue(
                                    &mut heap,
                                    cost + costs::TRANSPOSITION,
                                    step(node.pos + 2, Some(typed), prefix),
                                );
                            }
                        }
                        let ins = self.costs.insertion(c, previous);
                        enqueue(&mut heap, cost + ins, step(node.pos, None, prefix));
                    }
                }
            }

            if node.pending.is_none() && node.pos < n {
                let before = node.pos.checked_sub(1).map(|i| word[i]);
                let del = self.costs.deletion(word[node.pos], before);
                enqueue(
                    &mut heap,
                    cost + del,
                    Node {
                        pos: node.pos + 1,
                        ..node
                    },
                );
            }
        }

        log::trace!(
            "suggestion search for {:?}: {} steps, {} candidates",
            word.iter().collect::<String>(),
            steps,
            found.len()
        );
        found
    }
}

/// Ranked corrections for `word`, at most `options.max_suggestions`.
///
/// `spell` is the full option-aware check. A word it accepts, the empty
/// word included, is its own only suggestion. Candidates are re-cased to the typed word's case
/// pattern and kept only if `spell` accepts them, trying a capital first
/// letter for proper nouns written in lowercase.
pub fn suggestions(
    store: &TransducerStore,
    word: &[char],
    options: &Options,
    spell: &dyn Fn(&[char]) -> bool,
) -> Vec<String> {
    let max = options.max_suggestions;
    if max == 0 || word.len() > MAX_WORD_CHARS {
        return Vec::new();
    }
    if word.is_empty() || spell(word) {
        return vec![word.iter().collect()];
    }

    let case = detect_case(word);
    let mut accept = |candidate: &[char]| -> Option<String> {
        if candidate.is_empty() {
            return None;
        }
        let mut cased = candidate.to_vec();
        if !matches!(case, CaseType::Complex | CaseType::NoLetters) {
            apply_case(&mut cased, case);
        }
        if spell(&cased) {
            return Some(cased.into_iter().collect());
        }
        cased[0] = simple_upper(cased[0]);
        spell(&cased).then(|| cased.into_iter().collect())
    };

    let mut found = Suggester::new(store, options).search(&to_lower(word), max, &mut accept);
    found.extend(split_words(word, spell));

    found.sort_by(|a, b| a.rank().cmp(&b.rank()));
    let mut seen: HashSet<String> = HashSet::new();
    found.retain(|s| seen.insert(s.word.clone()));
    found.truncate(max);
    found.into_iter().map(|s| s.word).collect()
}

/// Two correct words run together: "koirakissa" gives "koira kissa".
fn split_words(word: &[char], spell: &dyn Fn(&[char]) -> bool) -> Vec<Suggestion> {
    (2..word.len().saturating_sub(1))
        .filter(|&i| spell(&word[..i]) && spell(&word[i..]))
        .map(|i| {
            let (left, right) = word.split_at(i);
            let mut text: String = left.iter().collect();
            text.push(' ');
            text.extend(right);
            Suggestion {
                word: text,
                cost: costs::SPLIT,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::FinnishAnalyzer;
    use crate::speller::{spell_word, AnalyzerSpeller, FinnishTweaks};
    use crate::test_lexicon;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn suggest_with(word: &str, options: &Options) -> Vec<String> {
        let analyzer = FinnishAnalyzer::from_bytes(&test_lexicon::morphology()).unwrap();
        let base = AnalyzerSpeller::new(&analyzer);
        let speller = FinnishTweaks::new(&base, &analyzer, options.accept_extra_hyphens);
        let spell = |w: &[char]| spell_word(w, &speller, None, options);
        suggestions(analyzer.store(), &chars(word), options, &spell)
    }

    fn suggest(word: &str) -> Vec<String> {
        suggest_with(word, &Options::default())
    }

    #[test]
    fn doubled_letter() {
        let found = suggest("koirra");
        assert_eq!(found.first().map(String::as_str), Some("koira"));
    }

    #[test]
    fn transposed_letters() {
        assert!(suggest("ksisa").contains(&"kissa".to_string()));
        assert!(suggest("kisas").contains(&"kissa".to_string()));
    }

    #[test]
    fn missing_and_extra_letters() {
        assert!(suggest("koia").contains(&"koira".to_string()));
        assert!(suggest("taloo").contains(&"talo".to_string()));
    }

    #[test]
    fn case_follows_the_typed_word() {
        assert_eq!(suggest("Koirra").first().map(String::as_str), Some("Koira"));
        assert_eq!(suggest("KOIRRA").first().map(String::as_str), Some("KOIRA"));
    }

    #[test]
    fn proper_nouns_get_their_capital() {
        assert!(suggest("helsingisä").contains(&"Helsingissä".to_string()));
    }

    #[test]
    fn correct_word_comes_back_alone() {
        assert_eq!(suggest("koira"), vec!["koira".to_string()]);
    }

    #[test]
    fn run_together_words_are_split() {
        assert!(suggest("koirakissa").contains(&"koira kissa".to_string()));
    }

    #[test]
    fn respects_max_suggestions() {
        let mut options = Options::default();
        options.max_suggestions = 2;
        assert!(suggest_with("kaulo", &options).len() <= 2);
        options.max_suggestions = 0;
        assert!(suggest_with("koirra", &options).is_empty());
    }

    #[test]
    fn hopeless_and_degenerate_input() {
        assert!(suggest("qqqqqqqqqq").is_empty());
        assert_eq!(suggest(""), vec![String::new()]);
        assert!(suggest(&"a".repeat(MAX_WORD_CHARS + 1)).is_empty());
    }

    #[test]
    fn cheaper_edits_rank_first() {
        let found = suggest("kosra");
        assert_eq!(found.first().map(String::as_str), Some("koira"));
    }

    #[test]
    fn step_cap_ends_the_search() {
        let analyzer = FinnishAnalyzer::from_bytes(&test_lexicon::morphology()).unwrap();
        let suggester = Suggester::new(analyzer.store(), &Options::default()).with_max_steps(1);
        let mut accept = |c: &[char]| Some(c.iter().collect::<String>());
        assert!(suggester.search(&chars("koirra"), 5, &mut accept).is_empty());
    }

    #[test]
    fn prefix_trie_shares_paths() {
        let mut p = Prefixes::new();
        let k = p.push(ROOT, 'k');
        let ko = p.push(k, 'o');
        assert_eq!(p.push(ROOT, 'k'), k);
        assert_eq!(p.chars(ko), chars("ko"));
        assert_eq!(p.last(ko), Some('o'));
        assert_eq!(p.last(ROOT), None);
    }
}
