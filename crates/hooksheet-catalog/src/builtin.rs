//! Built-in React hooks cheat sheet

use crate::{Catalog, Result, TopicEntry};

/// Entries of the built-in catalog, in display order
fn react_hook_entries() -> Vec<TopicEntry> {
    vec![
        TopicEntry::new("useState", "useState")
            .with_description("Local state that survives re-renders")
            .with_note("Pass an updater function when the next value depends on the previous one.")
            .with_code(
                "const [count, setCount] = useState(0);\n\
                 \n\
                 setCount(count + 1);\n\
                 setCount(prev => prev + 1);",
            )
            .with_accent("#61dafb"),
        TopicEntry::new("useEffect", "useEffect")
            .with_description("Synchronise a component with an external system")
            .with_note("Return a cleanup function; list every reactive value in the dependency array.")
            .with_code(
                "useEffect(() => {\n\
                 \x20 const id = setInterval(tick, 1000);\n\
                 \x20 return () => clearInterval(id);\n\
                 }, []);",
            )
            .with_accent("#f7df1e"),
        TopicEntry::new("useContext", "useContext")
            .with_description("Read a value provided higher up the tree")
            .with_note("Every consumer re-renders when the provider value changes identity.")
            .with_code(
                "const ThemeContext = createContext('light');\n\
                 \n\
                 const theme = useContext(ThemeContext);",
            )
            .with_accent("#c678dd"),
        TopicEntry::new("useReducer", "useReducer")
            .with_description("State transitions described by a reducer function")
            .with_note("Prefer it when several values change together or the next state has many cases.")
            .with_code(
                "function reducer(state, action) {\n\
                 \x20 switch (action.type) {\n\
                 \x20   case 'increment': return { count: state.count + 1 };\n\
                 \x20   default: return state;\n\
                 \x20 }\n\
                 }\n\
                 \n\
                 const [state, dispatch] = useReducer(reducer, { count: 0 });\n\
                 dispatch({ type: 'increment' });",
            )
            .with_accent("#e06c75"),
        TopicEntry::new("useCallback", "useCallback")
            .with_description("Keep a function identity stable between renders")
            .with_note("Only useful when the function is passed to memoised children or used as a dependency.")
            .with_code(
                "const handleClick = useCallback(() => {\n\
                 \x20 onSelect(item.id);\n\
                 }, [item.id, onSelect]);\n\
                 \n\
                 // same as useMemo(() => fn, deps)",
            )
            .with_accent("#98c379"),
        TopicEntry::new("useMemo", "useMemo")
            .with_description("Cache an expensive calculation between renders")
            .with_note("A performance hint, not a semantic guarantee; the cache may be dropped.")
            .with_code(
                "const visibleTodos = useMemo(\n\
                 \x20 () => filterTodos(todos, tab),\n\
                 \x20 [todos, tab]\n\
                 );",
            )
            .with_accent("#56b6c2"),
        TopicEntry::new("useRef", "useRef")
            .with_description("Mutable box or DOM handle that persists across renders")
            .with_note("Writing ref.current does not trigger a render.")
            .with_code(
                "const inputRef = useRef(null);\n\
                 \n\
                 <input ref={inputRef} />\n\
                 inputRef.current.focus();",
            )
            .with_accent("#d19a66"),
        TopicEntry::new("useLayoutEffect", "useLayoutEffect")
            .with_description("Effect that fires before the browser repaints")
            .with_note("Blocks painting; reach for it only to measure layout.")
            .with_code(
                "useLayoutEffect(() => {\n\
                 \x20 const { height } = ref.current.getBoundingClientRect();\n\
                 \x20 setTooltipHeight(height);\n\
                 }, []);",
            )
            .with_accent("#be5046"),
        TopicEntry::new("useId", "useId")
            .with_description("Unique ids for accessibility attributes")
            .with_note("Stable between server and client rendering; never use it for list keys.")
            .with_code(
                "const passwordHintId = useId();\n\
                 \n\
                 <input aria-describedby={passwordHintId} />\n\
                 <p id={passwordHintId}>At least 12 characters</p>",
            )
            .with_accent("#abb2bf"),
        TopicEntry::new("useTransition", "useTransition")
            .with_description("Mark an update as non-urgent so input stays responsive")
            .with_note("isPending lets you show a spinner while the transition renders.")
            .with_code(
                "const [isPending, startTransition] = useTransition();\n\
                 \n\
                 startTransition(() => {\n\
                 \x20 setTab(nextTab);\n\
                 });",
            )
            .with_accent("#e5c07b"),
        TopicEntry::new("customHook", "Custom hooks")
            .with_description("Extract reusable stateful logic into a use* function")
            .with_note("Each call gets its own state; hooks share logic, not state.")
            .with_code(
                "function useOnlineStatus() {\n\
                 \x20 const [isOnline, setIsOnline] = useState(navigator.onLine);\n\
                 \x20 useEffect(() => {\n\
                 \x20   const update = () => setIsOnline(navigator.onLine);\n\
                 \x20   window.addEventListener('online', update);\n\
                 \x20   window.addEventListener('offline', update);\n\
                 \x20   return () => {\n\
                 \x20     window.removeEventListener('online', update);\n\
                 \x20     window.removeEventListener('offline', update);\n\
                 \x20   };\n\
                 \x20 }, []);\n\
                 \x20 return isOnline;\n\
                 }",
            )
            .with_accent("#61afef"),
    ]
}

/// Build the built-in React hooks catalog
pub fn react_hooks() -> Catalog {
    Catalog::from_trusted(react_hook_entries())
}

/// Build the built-in catalog with full validation
pub fn try_react_hooks() -> Result<Catalog> {
    Catalog::new(react_hook_entries())
}

/// Number of entries in the built-in catalog
pub const REACT_HOOKS_LEN: usize = 11;
